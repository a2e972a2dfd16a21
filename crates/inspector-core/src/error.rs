//! Error types for inspection.
//!
//! Resolution misses (no element under the pointer) are not errors; they
//! surface as `None`. These variants cover host failures and bad config.

/// Result type alias for inspection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or aggregating an element.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A host (DOM) call raised an exception.
    #[error("{operation} failed: {message}")]
    Platform {
        operation: &'static str,
        message: String,
    },

    /// The host could not produce a computed style for the element.
    #[error("computed style unavailable for element")]
    ComputedStyleUnavailable,

    /// The inspector configuration is malformed.
    #[error("invalid inspector config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create a platform error.
    pub fn platform(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Platform {
            operation,
            message: message.into(),
        }
    }
}
