//! Error types shared by all engine operations.
//!
//! Every fallible operation validates its input and parameters up front and
//! returns one of these errors before any output pixel is written. Flat
//! regions are not an error anywhere in the engine; they take the identity
//! mapping path instead.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The image itself cannot be processed (for example an empty array).
    #[error("Invalid input image: {reason}")]
    InvalidInput { reason: String },
    /// A tuning parameter is outside its valid range for this image.
    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn parameter(reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            reason: reason.into(),
        }
    }
}
