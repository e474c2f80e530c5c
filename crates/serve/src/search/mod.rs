//! Search API module
//!
//! - `types`: service error type, header names and reason strings
//! - `handlers`: the HTTP search handler and its routes
//!
//! Request flow: access-token gate (middleware) → parameter validation →
//! search engine → response encoding. Any panic along the way is turned
//! into a 500 by the fault barrier installed in [`crate::server`].

pub mod handlers;
pub mod types;

pub use handlers::{encode_result, handle_search, search_routes};
pub use types::{
    ServiceError, ACCESS_TOKEN_HEADER, HAS_NEXT_PAGE_HEADER, REASON_INTERNAL,
    REASON_UNAUTHORIZED, TOTAL_COUNT_HEADER,
};
