//! Search API handlers
//!
//! # Endpoints
//!
//! - `GET /search?query=..&limit=..&offset=..&order_field=..&order_by=..`
//! - `GET /?...` - same handler, kept for clients that post to the root
//!
//! Both require the `AccessToken` header. A successful response is a JSON
//! array of users with the `X-Has-Next-Page` and `X-Total-Count` headers set.
//!
//! # Examples
//!
//! ```text
//! GET /search?query=Boyd&limit=30&offset=0&order_field=Age&order_by=-1
//! AccessToken: 583-asgl-1s4gh-789b
//! ```

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        HeaderMap, StatusCode,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use tracing::{info, warn};
use usersearch_core::{types::params, validate_params, SearchResult, ValidationError};

use crate::handlers::AppState;
use crate::middleware::access_token_middleware;
use crate::search::types::{ServiceError, HAS_NEXT_PAGE_HEADER, TOTAL_COUNT_HEADER};

/// Creates the search routes, guarded by the access-token check
pub fn search_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/search", get(handle_search))
        .route("/", get(handle_search))
        .route_layer(middleware::from_fn_with_state(state, access_token_middleware))
}

/// GET search handler
///
/// Missing `query` and `order_field` are treated as empty strings; every
/// other parameter must be present.
///
/// # Errors
///
/// Returns `ServiceError::Validation` for rejected parameters and
/// `ServiceError::Internal` if the result cannot be serialized.
pub async fn handle_search(
    State(state): State<AppState>,
    query: std::result::Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Response, ServiceError> {
    let Query(mut raw) = query.map_err(|rejection| {
        warn!("Unreadable query string: {}", rejection);
        ServiceError::Validation(ValidationError::MalformedParam {
            param: params::QUERY,
        })
    })?;

    raw.entry(params::QUERY.to_string()).or_default();
    raw.entry(params::ORDER_FIELD.to_string()).or_default();

    let request = validate_params(&raw)?;

    info!(
        query = %request.query,
        limit = request.limit,
        offset = request.offset,
        order_field = %request.order_field,
        order_by = request.order_by.code(),
        "Search request"
    );

    let result = state.engine.search(&request);
    encode_result(&result)
}

/// Serialize a search result into a 200 response
pub fn encode_result(result: &SearchResult) -> Result<Response, ServiceError> {
    let body = serde_json::to_vec(&result.users)
        .map_err(|e| ServiceError::internal(format!("Failed to serialize search result: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HAS_NEXT_PAGE_HEADER,
        HeaderValue::from_static(if result.has_next_page { "true" } else { "false" }),
    );
    if let Some(total) = result.total {
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
    }

    Ok((StatusCode::OK, headers, body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use usersearch_core::UserRecord;

    fn user(id: u32) -> UserRecord {
        UserRecord {
            id,
            name: format!("User {}", id),
            age: 20 + id,
            about: String::new(),
            gender: "female".to_string(),
        }
    }

    #[tokio::test]
    async fn test_encode_result_headers_and_body() {
        let result = SearchResult {
            users: vec![user(1), user(2)],
            has_next_page: true,
            total: Some(9),
        };

        let response = encode_result(&result).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[HAS_NEXT_PAGE_HEADER], "true");
        assert_eq!(response.headers()[TOTAL_COUNT_HEADER], "9");
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let users: Vec<UserRecord> = serde_json::from_slice(&body).unwrap();
        assert_eq!(users, result.users);
    }

    #[tokio::test]
    async fn test_encode_empty_result() {
        let response = encode_result(&SearchResult::default()).unwrap();
        assert_eq!(response.headers()[HAS_NEXT_PAGE_HEADER], "false");
        assert!(response.headers().get(TOTAL_COUNT_HEADER).is_none());

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"[]");
    }
}
