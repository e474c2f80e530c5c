//! Search command implementation

use clap::Args;
use std::time::Duration;
use usersearch_client::{ClientError, SearchClient, SearchQuery};
use usersearch_core::{Result, SearchError, ValidationError};

use crate::commands::CliCommand;
use crate::output::{OutputFormat, OutputFormatter};

/// Query a running usersearch server
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Substring to look for in name or about (case-sensitive)
    #[arg(default_value = "")]
    pub query: String,

    /// Server root URL
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    pub url: String,

    /// Access token sent in the AccessToken header
    #[arg(short, long, default_value = "")]
    pub token: String,

    /// Page size (0 for a full page)
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    pub limit: i64,

    /// Records to skip
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,

    /// Sort key: Id, Age or Name
    #[arg(long, default_value = "")]
    pub order_field: String,

    /// Sort direction: -1 ascending, 0 as-is, 1 descending
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub order_by: i64,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub timeout_ms: u64,

    /// Output format (json, yaml, pretty)
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

impl CliCommand for SearchCommand {
    async fn execute(&self) -> Result<()> {
        let format: OutputFormat = self.format.parse()?;

        let client = SearchClient::builder()
            .base_url(&self.url)
            .access_token(&self.token)
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()
            .map_err(|e| SearchError::invalid_config(e.to_string()))?;

        let query = self.to_query();
        let result = client
            .find_users(&query)
            .await
            .map_err(|e| client_error(e, &query))?;

        OutputFormatter::new(format).search_result(&result)
    }

    fn name(&self) -> &'static str {
        "search"
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(SearchError::invalid_config("Timeout cannot be 0"));
        }
        self.format.parse::<OutputFormat>()?;
        Ok(())
    }
}

impl SearchCommand {
    /// Build the client request from the arguments
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            query: self.query.clone(),
            limit: self.limit,
            offset: self.offset,
            order_field: self.order_field.clone(),
            order_by: self.order_by,
        }
    }
}

/// Translate a client failure into the CLI error taxonomy
///
/// Rejected parameters become validation errors, a refused token becomes
/// `Unauthorized`, and transport or server failures stay network errors.
pub fn client_error(err: ClientError, query: &SearchQuery) -> SearchError {
    if err.is_transient() {
        tracing::warn!("Search failed with a transient error, retrying may succeed: {}", err);
    }

    match err {
        ClientError::InvalidLimit => ValidationError::LimitNotPositive(query.limit).into(),
        ClientError::InvalidOffset => ValidationError::NegativeOffset(query.offset).into(),
        ClientError::BadOrderField { field } => ValidationError::InvalidOrderField(field).into(),
        ClientError::BadOrderBy { order_by } => ValidationError::InvalidOrderBy(order_by).into(),
        ClientError::BadAccessToken => SearchError::unauthorized(err.to_string()),
        ClientError::BadRequest { .. } => SearchError::rejected(err.to_string()),
        ClientError::InvalidUrl(_) | ClientError::HttpClient(_) => {
            SearchError::invalid_config(err.to_string())
        }
        ClientError::Timeout { .. }
        | ClientError::UnknownNetwork(_)
        | ClientError::UnpackErrorJson(_)
        | ClientError::UnpackResultJson(_)
        | ClientError::UnexpectedStatus { .. } => {
            SearchError::network(format!("Search failed: {}", err))
        }
    }
}
