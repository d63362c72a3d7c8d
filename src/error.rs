//! Error types for the EMMA gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the EMMA gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Provider answered with a non-success status
    #[error("provider error {status}: {body}")]
    Provider {
        status: reqwest::StatusCode,
        body: String,
    },

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether the provider was reached and rejected the request
    #[must_use]
    pub const fn is_provider_status(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }
}
