//! Error types for Valuta
//!
//! Provides standardized error handling across the plugin. User-facing
//! conversion failures are a separate type, [`crate::convert::ConvertError`],
//! because those are rendered as result rows rather than logged.

use thiserror::Error;

/// Errors that can occur in Valuta
#[derive(Debug, Error)]
pub enum ValutaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rates request failed before a response arrived
    #[error("Rates request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rates endpoint answered with a non-success status
    #[error("Rates endpoint returned HTTP {0}")]
    UpstreamStatus(reqwest::StatusCode),

    /// Rates payload did not have the expected shape
    #[error("Malformed rates payload: {0}")]
    Payload(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Valuta operations
pub type ValutaResult<T> = Result<T, ValutaError>;
