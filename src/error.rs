//! Error types for the dependency checks

use thiserror::Error;

/// Result type alias for check operations
pub type Result<T> = std::result::Result<T, CheckError>;

/// Main error type for check operations
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Package not found on {service}: {name}")]
    NotFound { service: String, name: String },

    #[error("API error from {service}: HTTP {status}")]
    Api { service: String, status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded for {service}. Retry after: {retry_after:?}")]
    RateLimitExceeded {
        service: String,
        retry_after: Option<std::time::Duration>,
    },

    #[error("Unexpected response from {service}: {message}")]
    Decode { service: String, message: String },

    #[error("Failed to read manifest {path}: {message}")]
    Manifest { path: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CheckError {
    /// Create a not-found error
    pub fn not_found(service: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            service: service.into(),
            name: name.into(),
        }
    }

    /// Create an API error for a non-success status
    pub fn api(service: impl Into<String>, status: u16) -> Self {
        Self::Api {
            service: service.into(),
            status,
        }
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a decode error
    pub fn decode(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a manifest error
    pub fn manifest(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error came from a non-success HTTP status rather than the
    /// transport or the payload
    pub fn is_http_status(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Api { .. } | Self::RateLimitExceeded { .. }
        )
    }
}
