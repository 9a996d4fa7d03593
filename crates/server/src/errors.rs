use axum::http::StatusCode;
use axum::response::Response;
use thiserror::Error;
use tracing::{error, warn};

use models::errors::ModelError;
use service::{errors::ServiceError, pagination::PaginationError};

use crate::codec::{CodecError, WireFormat};

/// Request failure. The message is returned to the caller as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Encode as an error body in the service's wire format.
    pub fn render<W: WireFormat>(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %msg, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %msg, "request rejected");
        }
        W::respond(status, W::encode_error(&msg))
    }
}

impl From<CodecError> for ApiError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Decode(_) => ApiError::BadRequest(e.to_string()),
            CodecError::Encode(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<PaginationError> for ApiError {
    fn from(e: PaginationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Storage(#[from] ModelError),
    #[error("server i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Json, Xml};

    #[test]
    fn decode_errors_are_client_errors() {
        let err: ApiError = CodecError::Decode("eof".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid request body: eof");
    }

    #[test]
    fn storage_errors_are_server_errors() {
        let err: ApiError = ServiceError::Db("gone away".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("gone away"));
    }

    #[test]
    fn render_sets_status_and_content_type() {
        let res = ApiError::BadRequest("nope".into()).render::<Json>();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(res.headers()["content-type"], "application/json");

        let res = ApiError::Internal("nope".into()).render::<Xml>();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.headers()["content-type"], "application/xml");
    }
}
