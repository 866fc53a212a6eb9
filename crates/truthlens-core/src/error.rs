//! Centralized error types for TruthLens.

use thiserror::Error;

/// Main error type for TruthLens operations.
#[derive(Error, Debug)]
pub enum TruthLensError {
    #[error("Input is required")]
    InvalidInput,

    #[error("Primary provider failure: {0}")]
    PrimaryProvider(String),

    #[error("Secondary provider failure: {0}")]
    SecondaryProvider(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for TruthLens operations.
pub type TruthLensResult<T> = Result<T, TruthLensError>;

impl TruthLensError {
    /// Wrap a primary provider error, keeping the full context chain.
    pub fn primary(err: &anyhow::Error) -> Self {
        Self::PrimaryProvider(format!("{:#}", err))
    }

    /// Wrap a secondary provider error, keeping the full context chain.
    pub fn secondary(err: &anyhow::Error) -> Self {
        Self::SecondaryProvider(format!("{:#}", err))
    }

    /// Create a malformed output error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedOutput(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error should be reported to the caller as a client error.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput)
    }
}
