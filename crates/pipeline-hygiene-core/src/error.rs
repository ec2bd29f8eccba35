//! Error types for the hygiene engine

use thiserror::Error;

/// Main error type for hygiene operations.
///
/// Rule evaluation never fails; these errors come from the edges of the
/// engine (configuration and catalog lookups).
#[derive(Debug, Error)]
pub enum HygieneError {
    /// Error in engine configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A rule identifier was not recognized
    #[error("Unknown rule: {0}")]
    UnknownRule(String),
}

/// Result type alias for hygiene operations
pub type Result<T> = std::result::Result<T, HygieneError>;
