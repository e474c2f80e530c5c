//! Error handling for the usersearch core library

use thiserror::Error;

use crate::validate::ValidationError;

/// Result type alias for usersearch operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Main error type for usersearch operations
#[derive(Error, Debug)]
pub enum SearchError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Search request rejected by the validator
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Dataset could not be loaded or is unusable
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// Network connectivity errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Credentials rejected by the search service
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Search service refused the request for a reason it did not classify
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    /// Invalid configuration values
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl SearchError {
    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        Self::Dataset {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a rejected-request error
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check if this error makes the process unable to serve at all
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Dataset { .. } | Self::Io(_) | Self::Json(_) | Self::InvalidConfig { .. }
        )
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Yaml(_) => "yaml",
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
            Self::Dataset { .. } => "dataset",
            Self::Network { .. } => "network",
            Self::Unauthorized { .. } => "auth",
            Self::Rejected { .. } => "request",
            Self::InvalidConfig { .. } => "config",
        }
    }
}
