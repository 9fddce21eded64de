//! Application error types

use thiserror::Error;
use veriface_domain::{DomainError, FlowStage};

use crate::ports::WorkerError;

/// Errors returned by the login flow orchestrator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// A remote call failed.
    #[error("worker error: {0}")]
    Worker(#[from] WorkerError),

    /// An operation was invoked before the flow reached the stage it
    /// depends on.
    #[error("{operation} is not legal at stage \"{stage}\"")]
    OutOfOrder {
        /// The operation that was attempted.
        operation: &'static str,
        /// The stage the flow was in.
        stage: FlowStage,
    },

    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Result type alias for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;
