//! Walker error types.

use thiserror::Error;

/// Errors raised while setting up a traversal.
///
/// Errors returned by a callback during traversal are never wrapped in this
/// type; they reach the caller of [`Walker::go`](crate::Walker::go) as-is.
#[derive(Debug, Error)]
pub enum WalkError {
    /// A walker was built without a callback.
    #[error("Configuration error: walker has no callback")]
    MissingCallback,

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WalkError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
