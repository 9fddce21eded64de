//! Verification worker port
//!
//! Defines the interface to the remote onboarding backend. The worker owns
//! the wire protocol (REST + JSON) and the bearer-token state used by the
//! authenticated calls; the application layer only sees decoded domain
//! types and the error taxonomy below.

use async_trait::async_trait;
use veriface_domain::{Cpf, MainData, SdkCredentials, StatusReport, TransactionReceipt};

/// Errors a remote call can end with. Exactly one variant per failure.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum WorkerError {
    /// The backend could not be reached.
    #[error("no connection: {0}")]
    NoConnection(String),

    /// The backend answered with a non-success status.
    #[error("server error {status_code}: {message}")]
    ServerError {
        /// HTTP status code of the response.
        status_code: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The call did not complete within the configured deadline.
    #[error("timed out: {0}")]
    TimedOut(String),

    /// The response arrived but could not be decoded.
    #[error("decode failure: {0}")]
    Decode(String),

    /// The call was cancelled before it completed.
    #[error("call cancelled")]
    Cancelled,
}

/// Port to the remote onboarding backend.
#[async_trait]
pub trait VerificationWorker: Send + Sync {
    /// Fetches the main data listing, which carries the access tokens.
    ///
    /// # Errors
    /// Returns a `WorkerError` variant describing the failure.
    async fn fetch_main_data(&self) -> Result<MainData, WorkerError>;

    /// Creates a verification transaction for the given CPF.
    ///
    /// # Errors
    /// Returns a `WorkerError` variant describing the failure.
    async fn create_transaction(&self, cpf: &Cpf) -> Result<TransactionReceipt, WorkerError>;

    /// Retrieves the processing status of a transaction.
    ///
    /// This is a single check, not a polling loop; callers decide whether
    /// to ask again.
    ///
    /// # Errors
    /// Returns a `WorkerError` variant describing the failure.
    async fn transaction_status(&self, transaction_id: &str) -> Result<StatusReport, WorkerError>;

    /// Fetches the face-verification SDK credentials.
    ///
    /// # Errors
    /// Returns a `WorkerError` variant describing the failure.
    async fn fetch_credentials(&self) -> Result<SdkCredentials, WorkerError>;

    /// Sets the bearer token attached to subsequent calls.
    fn set_access_token(&self, token: &str);

    /// Best-effort cancellation of in-flight calls.
    ///
    /// Calls already past their network phase may still complete.
    async fn cancel_all(&self) {}
}
