//! Error types for the submission data model.

use thiserror::Error;

/// Errors raised while interpreting model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A derived-group field key does not name a known height metric.
    #[error("unknown derived field '{0}'")]
    UnknownDerivedField(String),

    /// A camera attribute key is not one of the tracked attributes.
    #[error("unknown camera attribute '{0}'")]
    UnknownCameraAttribute(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
