//! Server configuration
//!
//! Values are layered: built-in defaults, then an optional YAML or JSON
//! file, then `USERSEARCH_*` environment variables
//! (e.g. `USERSEARCH_PORT=8080`, `USERSEARCH_ACCESS_TOKENS=a,b`).

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use usersearch_core::{Result, SearchError, MAX_PAGE_SIZE};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "USERSEARCH";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON file holding the user records
    pub dataset_path: PathBuf,
    /// Tokens accepted in the `AccessToken` header
    pub access_tokens: Vec<String>,
    /// Page-size cap applied by the search engine
    pub max_page_size: usize,
    pub cors_enabled: bool,
    pub max_request_size: usize,
    /// Let the fault-injection token trigger a simulated internal failure
    pub fault_injection: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dataset_path: PathBuf::from("data/dataset.json"),
            access_tokens: Vec::new(),
            max_page_size: MAX_PAGE_SIZE,
            cors_enabled: false,
            max_request_size: 64 * 1024, // 64KB
            fault_injection: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Config` if a source cannot be read or parsed and
    /// `SearchError::InvalidConfig` if the merged values are unusable.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(SearchError::invalid_config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("access_tokens"),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(SearchError::invalid_config("Port cannot be 0"));
        }
        if self.max_page_size == 0 {
            return Err(SearchError::invalid_config(
                "max_page_size must be greater than 0",
            ));
        }
        if self.max_request_size == 0 {
            return Err(SearchError::invalid_config(
                "max_request_size must be greater than 0",
            ));
        }
        if self.access_tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(SearchError::invalid_config("Access tokens cannot be empty"));
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| SearchError::invalid_config(format!("Invalid address {}: {}", addr, e)))
    }
}
