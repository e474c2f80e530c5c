//! API module for the usersearch serve crate

use axum::{response::IntoResponse, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};

use crate::handlers::{handle_health_check, AppState};
use crate::search::search_routes;

/// API routes configuration
///
/// `/health` and `/version` are open; the search routes sit behind the
/// access-token gate.
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health_check))
        .route("/version", get(get_version))
        .merge(search_routes(state.clone()))
        .with_state(state)
}

/// Get version information
pub async fn get_version() -> impl IntoResponse {
    Json(VersionResponse {
        name: usersearch_core::NAME.to_string(),
        version: crate::VERSION.to_string(),
        max_page_size: usersearch_core::MAX_PAGE_SIZE,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub name: String,
    pub version: String,
    pub max_page_size: usize,
}
