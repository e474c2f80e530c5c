//! Shared application state and service-level handlers

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use usersearch_core::{Dataset, Result, SearchEngine};

use crate::ServerConfig;

/// Application state shared across handlers
///
/// Built once at startup. The dataset inside the engine is immutable, so
/// the state is cloned freely into every request without locking.
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: SearchEngine,
    pub access_tokens: Arc<HashSet<String>>,
    pub fault_injection: bool,
}

impl AppState {
    /// Create application state around an already loaded dataset
    pub fn new(config: &ServerConfig, dataset: Dataset) -> Self {
        Self {
            engine: SearchEngine::with_page_size(dataset, config.max_page_size),
            access_tokens: Arc::new(config.access_tokens.iter().cloned().collect()),
            fault_injection: config.fault_injection,
        }
    }

    /// Load the dataset named in the configuration and build the state
    ///
    /// # Errors
    ///
    /// Fails if the dataset is missing, malformed or empty.
    pub fn load(config: &ServerConfig) -> Result<Self> {
        let dataset = Dataset::load_all(&config.dataset_path)?;
        Ok(Self::new(config, dataset))
    }

    /// Check whether a presented token grants access
    pub fn is_authorized(&self, token: &str) -> bool {
        !token.is_empty() && self.access_tokens.contains(token)
    }
}

/// Handler for server health check
pub async fn handle_health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        records: state.engine.dataset().len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub records: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
