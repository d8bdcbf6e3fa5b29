//! Error types for the FAQ Assistant.
//!
//! A single error enum covers every failure category: configuration, I/O,
//! the LLM backend, the storage backend, request validation and
//! serialization. Call sites that must degrade instead of failing match on
//! the variant explicitly.

use thiserror::Error;

/// Unified error type for the FAQ Assistant.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The LLM backend failed (network, auth, quota or malformed response)
    #[error("LLM error: {0}")]
    Llm(String),

    /// The knowledge store or interaction log could not be read or written
    #[error("Store unavailable: {0}")]
    Store(String),

    /// Client supplied input that failed a presence check
    #[error("{0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Page template errors
    #[error("Template error: {0}")]
    Template(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
