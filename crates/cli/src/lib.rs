//! usersearch CLI library
//!
//! Command-line components: the `serve` and `search` commands and output
//! formatting.

use usersearch_core::SearchError;

pub mod commands;
pub mod output;

pub use commands::*;
pub use output::*;

/// CLI version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the appropriate exit code for an error
pub fn exit_code_for_error(error: &SearchError) -> i32 {
    match error {
        SearchError::Validation(_) | SearchError::Rejected { .. } => 2,
        SearchError::Config(_) | SearchError::InvalidConfig { .. } => 3,
        SearchError::Dataset { .. } | SearchError::Io(_) | SearchError::Json(_) => 4,
        SearchError::Network { .. } => 5,
        SearchError::Unauthorized { .. } => 6,
        _ => 1,
    }
}
