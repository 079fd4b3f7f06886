//! Error types for string transforms.

use thiserror::Error;

/// Errors that can occur when applying a string transform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The requested hash algorithm is not in the supported set.
    #[error("Algorithm {0} is not available on this system")]
    UnsupportedAlgorithm(String),
}

/// Result type for string transforms.
pub type Result<T> = std::result::Result<T, TransformError>;
