//! Login session state
//!
//! The mutable record threaded through the login flow. Each successful
//! remote call fills in another field; failed calls must leave it untouched.

use serde::{Deserialize, Serialize};

use crate::credentials::SdkCredentials;

/// Accumulated state of one login/verification attempt.
///
/// Created empty when the flow starts and mutated in place by the
/// orchestrator, one writer per field. It lives for the duration of the
/// login flow and is handed (in part) to the face-verification SDK.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Bearer token obtained from the main-data endpoint.
    pub access_token: String,
    /// Server-issued identifier correlating this verification attempt.
    pub transaction_id: String,
    /// Human-readable processing status of the transaction.
    pub status_description: Option<String>,
    /// SDK certificate (PEM text).
    pub certificate: Option<String>,
    /// SDK device key identifier.
    pub device_key_identifier: Option<String>,
    /// SDK production key text.
    pub production_key_text: Option<String>,
}

impl SessionState {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a transaction has been started.
    #[must_use]
    pub fn has_transaction(&self) -> bool {
        !self.transaction_id.is_empty()
    }

    /// Returns true if every credential needed by the SDK is present.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.certificate.is_some()
            && self.device_key_identifier.is_some()
            && self.production_key_text.is_some()
    }

    /// Stores the credential bundle.
    pub fn store_credentials(&mut self, credentials: SdkCredentials) {
        self.certificate = Some(credentials.certificate);
        self.device_key_identifier = Some(credentials.device_key_identifier);
        self.production_key_text = Some(credentials.production_key_text);
    }
}
