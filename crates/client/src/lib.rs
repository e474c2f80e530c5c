//! usersearch client library
//!
//! Issues search requests against a usersearch server and turns every
//! response into either a [`SearchResult`] or a typed [`ClientError`].
//!
//! # Examples
//!
//! ```no_run
//! use usersearch_client::{SearchClient, SearchQuery};
//!
//! # async fn run() -> usersearch_client::Result<()> {
//! let client = SearchClient::builder()
//!     .base_url("http://127.0.0.1:8080")
//!     .access_token("583-asgl-1s4gh-789b")
//!     .build()?;
//!
//! let result = client
//!     .find_users(&SearchQuery {
//!         query: "Boyd".to_string(),
//!         limit: 10,
//!         order_field: "Age".to_string(),
//!         order_by: -1,
//!         ..SearchQuery::default()
//!     })
//!     .await?;
//! println!("{} users, more: {}", result.users.len(), result.has_next_page);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;

pub use client::{ClientBuilder, ClientConfig, SearchClient, SearchQuery, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};
pub use usersearch_core::{SearchResult, UserRecord};
