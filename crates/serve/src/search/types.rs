//! Search service error type and response conventions
//!
//! Every failure is rendered as a JSON [`SearchErrorResponse`] with the
//! status code chosen here, so clients can always decode a non-200 body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{error, warn};
use usersearch_core::{SearchErrorResponse, ValidationError};

/// Header carrying the access token
pub const ACCESS_TOKEN_HEADER: &str = "accesstoken";

/// Response header telling whether more records follow the returned page
pub const HAS_NEXT_PAGE_HEADER: &str = "x-has-next-page";

/// Response header with the number of matching records before pagination
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Reason sent with 401 responses
pub const REASON_UNAUTHORIZED: &str = "unauthorized";

/// Reason sent with every 500 response
pub const REASON_INTERNAL: &str = "internal server error";

/// Errors produced while handling a search request
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Missing or unknown access token
    #[error("unauthorized")]
    Unauthorized,

    /// Query parameters failed validation
    #[error("invalid search request: {0}")]
    Validation(#[from] ValidationError),

    /// Anything else; details are logged, never sent
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Reason string placed in the error payload
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Unauthorized => REASON_UNAUTHORIZED,
            Self::Validation(err) => err.reason(),
            Self::Internal(_) => REASON_INTERNAL,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            Self::Unauthorized => warn!("Rejected search request: invalid access token"),
            Self::Validation(err) => warn!(reason = err.reason(), "Rejected search request: {}", err),
            Self::Internal(msg) => error!("Internal search error: {}", msg),
        }

        let body = Json(SearchErrorResponse::new(self.reason()));
        (self.status_code(), body).into_response()
    }
}
