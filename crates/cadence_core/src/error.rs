//! Error types shared by every Cadence crate

use thiserror::Error;

/// Contract violations surfaced by choreography and dynamics operations.
///
/// Every variant is raised synchronously by the call that breaks the
/// contract. Per-frame simulation never produces one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CadenceError {
    /// A required argument is missing or has an illegal value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A value falls outside the configured `[min, max]` range
    #[error("Value {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    /// The operation cannot be performed in the current configuration
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A frame-clock bound call was made off the owning thread
    #[error("Concurrency violation: {0}")]
    ConcurrencyViolation(String),

    /// A task template the choreographer does not know how to instantiate
    #[error("Unsupported task type: {0}")]
    UnsupportedTaskType(String),
}

impl CadenceError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }
}

/// Result type for Cadence operations
pub type Result<T> = std::result::Result<T, CadenceError>;
