//! Error types for vectorcore operations.

use thiserror::Error;

/// Result type alias for vectorcore operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported synchronously at the point of detection.
///
/// No operation retries internally, and a failed mutation leaves the store or
/// index exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A parameter or input buffer violates the operation's contract
    /// (zero dimension, length mismatch, `M == 0`, unknown metric, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal index accessor was called beyond the current size.
    #[error("Index {index} out of range (size {len})")]
    OutOfRange { index: usize, len: usize },
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn dimension_mismatch(expected: usize, got: usize) -> Self {
        Error::InvalidArgument(format!("dimension mismatch: expected {expected}, got {got}"))
    }
}
