//! Middleware for the usersearch serve crate

use axum::{
    extract::{Request, State},
    http::{
        header::{HeaderValue, AUTHORIZATION},
        HeaderMap,
    },
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use std::any::Any;
use std::time::Instant;
use tracing::Instrument;
use usersearch_core::SearchErrorResponse;
use uuid::Uuid;

use crate::handlers::AppState;
use crate::search::types::{ServiceError, ACCESS_TOKEN_HEADER, REASON_INTERNAL};

/// Token that simulates an internal failure when fault injection is enabled
pub const FAULT_INJECTION_TOKEN: &str = "SIMULATE_INTERNAL_SERVER_ERROR";

/// Header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID middleware for tracing
///
/// Every log line emitted while serving the request carries the id, and the
/// id is echoed back in the `x-request-id` response header.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let header = HeaderValue::from_str(&request_id).ok();

    if let Some(value) = &header {
        request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }

    let span = tracing::info_span!("request", request_id = %request_id);
    let mut response = next.run(request).instrument(span).await;

    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Timing middleware to log request duration
pub async fn timing_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = %response.status(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

/// Extract the presented access token
///
/// The `AccessToken` header wins; `Authorization: Bearer <token>` is
/// accepted as a fallback.
pub fn extract_access_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
        })
}

/// Access-token gate for the search routes
///
/// Runs before parameter validation, so an unauthorized caller never learns
/// anything about its parameters.
///
/// # Panics
///
/// Deliberately panics on the fault-injection token when
/// `fault_injection` is enabled. The panic is turned into a 500 by
/// [`handle_panic`].
pub async fn access_token_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let token = extract_access_token(request.headers()).unwrap_or_default();

    if state.fault_injection && token == FAULT_INJECTION_TOKEN {
        tracing::warn!("Fault injection token received");
        panic!("simulated internal server error");
    }

    if !state.is_authorized(token) {
        tracing::debug!(
            token_prefix = &token[..token.len().min(4)],
            "Access token rejected"
        );
        return ServiceError::Unauthorized.into_response();
    }

    next.run(request).await
}

/// Convert a handler panic into a 500 JSON response
///
/// Used with `CatchPanicLayer::custom`; the panic payload is logged and
/// never sent to the client.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %message, "Request handler panicked");

    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        Json(SearchErrorResponse::new(REASON_INTERNAL)),
    )
        .into_response()
}
