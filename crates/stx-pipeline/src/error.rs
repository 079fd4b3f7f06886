//! Error types for pipeline construction and execution.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Broad class of a [`PipelineError`].
///
/// Mirrors the condition classes callers usually branch on: a step target
/// of the wrong type, a value that does not behave, or a missing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The supplied object has the wrong shape (not invocable, malformed description).
    Type,
    /// The supplied handler or value misbehaves (probe failure, non-string output).
    Value,
    /// A configured column is absent from the table.
    Key,
    /// Anything else (table engine, configuration parsing, handler failures).
    Other,
}

/// Errors that can occur when building or running a pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// The step target cannot be invoked (unknown handler name).
    #[error("Supplied function '{name}' is not callable")]
    NotCallable { name: String },

    /// The handler failed when probed with the test string.
    #[error("Supplied function '{name}' does not work with strings")]
    Incompatible {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The handler accepted the test string but returned something else.
    #[error("Supplied function '{name}' does not return a string (got {found})")]
    NonStringResult { name: String, found: &'static str },

    /// The step description is neither a handler nor a combination.
    #[error("Can only add steps as handler or combination, got {0}")]
    InvalidStepDescription(String),

    /// The step combination does not name a handler.
    #[error("No handler specified")]
    MissingHandler,

    /// An explicitly selected column is not in the table.
    #[error("Column not found: {0}")]
    MissingColumn(String),

    /// An explicitly selected column does not hold strings.
    #[error("Column '{column}' has dtype {dtype}, expected a string column")]
    NotTextColumn { column: String, dtype: String },

    /// A step returned a non-string value for a real cell.
    #[error("Step '{step}' returned {found} instead of a string")]
    NonStringOutput { step: String, found: &'static str },

    /// A step failed on a real value; the handler's error is passed through.
    #[error(transparent)]
    Handler(anyhow::Error),

    /// The pipeline configuration could not be parsed.
    #[error("Invalid pipeline configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

impl PipelineError {
    /// Returns the broad class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotCallable { .. } | Self::InvalidStepDescription(_) => ErrorKind::Type,
            Self::Incompatible { .. }
            | Self::NonStringResult { .. }
            | Self::MissingHandler
            | Self::NotTextColumn { .. }
            | Self::NonStringOutput { .. } => ErrorKind::Value,
            Self::MissingColumn(_) => ErrorKind::Key,
            Self::Handler(_) | Self::Config(_) | Self::PolarsError(_) => ErrorKind::Other,
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
