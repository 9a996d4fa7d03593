//! Pagination window for list queries.
//!
//! `offset` and `limit` arrive as raw query-string values; absent or empty
//! values fall back to the defaults.

use std::num::ParseIntError;

use thiserror::Error;

pub const DEFAULT_OFFSET: u64 = 0;
pub const DEFAULT_LIMIT: u64 = 50;

#[derive(Debug, Error)]
pub enum PaginationError {
    #[error("invalid {param} {value:?}: {source}")]
    Invalid {
        param: &'static str,
        value: String,
        source: ParseIntError,
    },
}

/// Rows to skip and the maximum number of rows to return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Window {
    fn default() -> Self {
        Self { offset: DEFAULT_OFFSET, limit: DEFAULT_LIMIT }
    }
}

impl Window {
    pub fn from_params(offset: Option<&str>, limit: Option<&str>) -> Result<Self, PaginationError> {
        Ok(Self {
            offset: parse_param("offset", offset, DEFAULT_OFFSET)?,
            limit: parse_param("limit", limit, DEFAULT_LIMIT)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

fn parse_param(
    param: &'static str,
    raw: Option<&str>,
    default: u64,
) -> Result<u64, PaginationError> {
    match raw {
        None | Some("") => Ok(default),
        Some(value) => value.parse::<u64>().map_err(|source| PaginationError::Invalid {
            param,
            value: value.to_string(),
            source,
        }),
    }
}
