//! Search client implementation

use reqwest::StatusCode;
use std::time::Duration;
use url::Url;
use usersearch_core::{types::params, SearchErrorResponse, SearchResult, UserRecord, MAX_PAGE_SIZE};

use crate::error::{ClientError, Result};

/// Request timeout used unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Path of the search endpoint below the base URL
pub const SEARCH_PATH: &str = "search";

const ACCESS_TOKEN_HEADER: &str = "AccessToken";
const HAS_NEXT_PAGE_HEADER: &str = "x-has-next-page";
const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Server-side reasons the client turns into typed errors
const REASON_BAD_ORDER_FIELD: &str = "ErrorBadOrderField";
const REASON_BAD_ORDER_BY: &str = "ErrorBadOrderBy";

/// Search client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, e.g. `http://127.0.0.1:8080`
    pub base_url: String,
    pub access_token: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            access_token: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Raw, unvalidated search request as a caller writes it
///
/// `order_by` uses the wire codes: -1 ascending, 0 as-is, 1 descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub limit: i64,
    pub offset: i64,
    pub order_field: String,
    pub order_by: i64,
}

/// Client for the usersearch HTTP service
#[derive(Debug, Clone)]
pub struct SearchClient {
    config: ClientConfig,
    endpoint: Url,
    client: reqwest::Client,
}

impl SearchClient {
    /// Create a new search client
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if the base URL does not parse.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let endpoint = Url::parse(&format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            SEARCH_PATH
        ))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::HttpClient(e.to_string()))?;

        Ok(Self {
            config,
            endpoint,
            client,
        })
    }

    /// Start building a client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Search endpoint the client talks to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run a search against the service
    ///
    /// `limit == 0` asks for a full page; larger limits are clamped to
    /// [`MAX_PAGE_SIZE`].
    ///
    /// # Errors
    ///
    /// Negative `limit` or `offset` fail before any request is sent. After
    /// that every transport failure and non-200 status has its own
    /// [`ClientError`] variant.
    pub async fn find_users(&self, query: &SearchQuery) -> Result<SearchResult> {
        if query.limit < 0 {
            return Err(ClientError::InvalidLimit);
        }
        if query.offset < 0 {
            return Err(ClientError::InvalidOffset);
        }

        let max_page = MAX_PAGE_SIZE as i64;
        let limit = if query.limit == 0 {
            max_page
        } else {
            query.limit.min(max_page)
        };

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(params::QUERY, &query.query)
            .append_pair(params::LIMIT, &limit.to_string())
            .append_pair(params::OFFSET, &query.offset.to_string())
            .append_pair(params::ORDER_FIELD, &query.order_field)
            .append_pair(params::ORDER_BY, &query.order_by.to_string());
        let encoded = url.query().unwrap_or_default().to_string();

        tracing::debug!(url = %url, "Sending search request");

        let response = self
            .client
            .get(url)
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .send()
            .await
            .map_err(|e| self.transport_error(e, &encoded))?;

        let status = response.status();
        let has_next_page = header_value::<bool>(&response, HAS_NEXT_PAGE_HEADER);
        let total = header_value::<usize>(&response, TOTAL_COUNT_HEADER);

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e, &encoded))?;

        match status {
            StatusCode::OK => {
                let users: Vec<UserRecord> = serde_json::from_slice(&body)
                    .map_err(|e| ClientError::UnpackResultJson(e.to_string()))?;
                let has_next_page =
                    has_next_page.unwrap_or_else(|| users.len() as i64 == limit);

                tracing::debug!(
                    returned = users.len(),
                    has_next_page,
                    "Search request succeeded"
                );

                Ok(SearchResult {
                    users,
                    has_next_page,
                    total,
                })
            }
            StatusCode::UNAUTHORIZED => {
                tracing::warn!("Search service rejected the access token");
                Err(ClientError::BadAccessToken)
            }
            StatusCode::BAD_REQUEST => {
                let payload: SearchErrorResponse = serde_json::from_slice(&body)
                    .map_err(|e| ClientError::UnpackErrorJson(e.to_string()))?;

                Err(match payload.error.as_str() {
                    REASON_BAD_ORDER_FIELD => ClientError::BadOrderField {
                        field: query.order_field.clone(),
                    },
                    REASON_BAD_ORDER_BY => ClientError::BadOrderBy {
                        order_by: query.order_by,
                    },
                    _ => ClientError::BadRequest {
                        reason: payload.error,
                    },
                })
            }
            other => {
                let reason = serde_json::from_slice::<SearchErrorResponse>(&body)
                    .ok()
                    .map(|payload| payload.error);
                tracing::warn!(status = other.as_u16(), ?reason, "Unexpected search response");

                Err(ClientError::UnexpectedStatus {
                    status: other.as_u16(),
                    reason,
                })
            }
        }
    }

    fn transport_error(&self, err: reqwest::Error, encoded: &str) -> ClientError {
        if err.is_timeout() {
            tracing::warn!(timeout = ?self.config.timeout, "Search request timed out");
            ClientError::Timeout {
                params: encoded.to_string(),
                timeout: self.config.timeout,
            }
        } else {
            ClientError::UnknownNetwork(err.to_string())
        }
    }
}

fn header_value<T: std::str::FromStr>(response: &reqwest::Response, name: &str) -> Option<T> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Builder for [`SearchClient`]
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new client builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server root URL
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the access token sent with every request
    pub fn access_token<S: Into<String>>(mut self, token: S) -> Self {
        self.config.access_token = token.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SearchClient> {
        SearchClient::new(self.config)
    }
}
