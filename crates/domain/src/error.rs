//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided CPF is malformed.
    #[error("invalid CPF: {0}")]
    InvalidCpf(String),

    /// A transaction identifier is empty or unset.
    #[error("transaction identifier is empty")]
    EmptyTransactionId,

    /// A credential required for the SDK handoff is missing.
    #[error("missing SDK credential: {0}")]
    MissingCredential(&'static str),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
