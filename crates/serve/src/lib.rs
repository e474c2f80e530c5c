//! usersearch serve library
//!
//! HTTP search service over an in-memory user dataset. Requests are
//! authenticated with an access token, validated, searched and paginated;
//! every failure is answered with a JSON error payload.

pub mod api;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod search;
pub mod server;

pub use config::ServerConfig;
pub use handlers::{AppState, HealthCheckResponse};
pub use middleware::FAULT_INJECTION_TOKEN;
pub use search::ServiceError;
pub use server::{create_app, SearchServer, ServerBuilder};

/// Server version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
