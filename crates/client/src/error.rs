//! Error types for the usersearch client

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Everything that can go wrong while calling the search service
///
/// Each HTTP status path maps to its own variant so callers can tell a bad
/// token from a bad parameter from a broken server.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("limit must be > 0")]
    InvalidLimit,

    #[error("offset must be > 0")]
    InvalidOffset,

    #[error("timeout for {params} after {timeout:?}")]
    Timeout { params: String, timeout: Duration },

    #[error("unknown network error: {0}")]
    UnknownNetwork(String),

    #[error("bad access token")]
    BadAccessToken,

    #[error("cant unpack error json: {0}")]
    UnpackErrorJson(String),

    #[error("cant unpack result json: {0}")]
    UnpackResultJson(String),

    #[error("order field {field} invalid")]
    BadOrderField { field: String },

    #[error("order_by {order_by} invalid")]
    BadOrderBy { order_by: i64 },

    #[error("unknown bad request error: {reason}")]
    BadRequest { reason: String },

    /// Any status other than 200, 400 and 401
    #[error("unknown error: status {status}")]
    UnexpectedStatus { status: u16, reason: Option<String> },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

impl ClientError {
    /// Check whether retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::UnknownNetwork(_) | Self::UnexpectedStatus { .. }
        )
    }
}
