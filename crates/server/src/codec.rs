//! Wire encodings for request bodies and responses.
//!
//! The client registry speaks JSON, the inventory registry XML. Both go
//! through [`WireFormat`] so the handlers stay encoding-agnostic.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid request body: {0}")]
    Decode(String),
    #[error("cannot encode response: {0}")]
    Encode(String),
}

pub trait WireFormat: Send + Sync + 'static {
    const CONTENT_TYPE: &'static str;

    /// Decode a request body. Unknown fields are ignored.
    fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, CodecError>;

    fn encode_record<T: Serialize>(element: &str, record: &T) -> Result<String, CodecError>;

    fn encode_list<T: Serialize>(
        collection: &str,
        element: &str,
        records: &[T],
    ) -> Result<String, CodecError>;

    fn encode_error(message: &str) -> String;

    fn respond(status: StatusCode, body: String) -> Response {
        (status, [(header::CONTENT_TYPE, Self::CONTENT_TYPE)], body).into_response()
    }
}

/// `application/json`; element names are unused.
pub struct Json;

/// `application/xml`; records are `<element>` trees, lists wrap them in `<collection>`.
pub struct Xml;

#[derive(Serialize)]
struct JsonError<'a> {
    error: &'a str,
}

#[derive(Serialize)]
struct XmlError<'a> {
    message: &'a str,
}

impl WireFormat for Json {
    const CONTENT_TYPE: &'static str = "application/json";

    fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(body).map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn encode_record<T: Serialize>(_element: &str, record: &T) -> Result<String, CodecError> {
        serde_json::to_string(record).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn encode_list<T: Serialize>(
        _collection: &str,
        _element: &str,
        records: &[T],
    ) -> Result<String, CodecError> {
        serde_json::to_string(records).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn encode_error(message: &str) -> String {
        serde_json::to_string(&JsonError { error: message })
            .unwrap_or_else(|_| format!("{{\"error\":{message:?}}}"))
    }
}

impl WireFormat for Xml {
    const CONTENT_TYPE: &'static str = "application/xml";

    fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, CodecError> {
        let text = std::str::from_utf8(body).map_err(|e| CodecError::Decode(e.to_string()))?;
        quick_xml::de::from_str(text).map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn encode_record<T: Serialize>(element: &str, record: &T) -> Result<String, CodecError> {
        quick_xml::se::to_string_with_root(element, record)
            .map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn encode_list<T: Serialize>(
        collection: &str,
        element: &str,
        records: &[T],
    ) -> Result<String, CodecError> {
        let mut out = format!("<{collection}>");
        for record in records {
            out.push_str(&Self::encode_record(element, record)?);
        }
        out.push_str(&format!("</{collection}>"));
        Ok(out)
    }

    fn encode_error(message: &str) -> String {
        quick_xml::se::to_string_with_root("error", &XmlError { message })
            .unwrap_or_else(|_| "<error/>".to_string())
    }
}
