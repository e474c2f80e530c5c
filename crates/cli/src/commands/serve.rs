//! Serve command implementation

use clap::Args;
use std::path::PathBuf;
use usersearch_core::{Result, SearchError};
use usersearch_serve::{SearchServer, ServerConfig};

use crate::commands::CliCommand;

/// Start the usersearch HTTP server
#[derive(Debug, Default, Args)]
pub struct ServeCommand {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Dataset file with the user records
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Accepted access token (repeatable)
    #[arg(long = "access-token")]
    pub access_tokens: Vec<String>,

    /// Maximum page size
    #[arg(long)]
    pub max_page_size: Option<usize>,

    /// Enable CORS
    #[arg(long)]
    pub cors: bool,

    /// Let the fault-injection token trigger a simulated internal error
    #[arg(long)]
    pub fault_injection: bool,
}

impl CliCommand for ServeCommand {
    async fn execute(&self) -> Result<()> {
        self.build_server()?.start().await
    }

    fn name(&self) -> &'static str {
        "serve"
    }

    fn validate(&self) -> Result<()> {
        if self.port == Some(0) {
            return Err(SearchError::invalid_config("Port cannot be 0"));
        }
        if self.max_page_size == Some(0) {
            return Err(SearchError::invalid_config(
                "Max page size must be greater than 0",
            ));
        }
        if let Some(path) = &self.config {
            if !path.exists() {
                return Err(SearchError::invalid_config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

impl ServeCommand {
    /// Resolve the configuration and load the dataset without binding
    pub fn build_server(&self) -> Result<SearchServer> {
        let config = self.resolve_config()?;

        if config.access_tokens.is_empty() {
            tracing::warn!("No access tokens configured; every search will be rejected");
        }
        if config.fault_injection {
            tracing::warn!("Fault injection is enabled");
        }

        SearchServer::new(config)
    }

    /// Load file and environment configuration, then apply flags on top
    pub fn resolve_config(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::load(self.config.as_deref())?;

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dataset) = &self.dataset {
            config.dataset_path = dataset.clone();
        }
        if !self.access_tokens.is_empty() {
            config.access_tokens = self.access_tokens.clone();
        }
        if let Some(size) = self.max_page_size {
            config.max_page_size = size;
        }
        if self.cors {
            config.cors_enabled = true;
        }
        if self.fault_injection {
            config.fault_injection = true;
        }

        config.validate()?;
        Ok(config)
    }
}
