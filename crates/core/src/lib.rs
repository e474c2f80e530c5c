//! usersearch core library
//!
//! Data model, dataset store, request validation and the search engine
//! shared by the usersearch server and client.

pub mod dataset;
pub mod engine;
pub mod error;
pub mod logging;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use dataset::Dataset;
pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use types::{
    OrderBy, OrderField, SearchErrorResponse, SearchRequest, SearchResult, UserRecord,
    MAX_PAGE_SIZE,
};
pub use validate::{validate_params, ValidationError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version info as a formatted string
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
