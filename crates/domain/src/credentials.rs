//! SDK credential bundle and handoff

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::session::SessionState;

/// Credentials required to initialize the face-verification SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkCredentials {
    /// Certificate text.
    pub certificate: String,
    /// Device key identifier.
    pub device_key_identifier: String,
    /// Production key text.
    pub production_key_text: String,
}

/// Everything the external SDK needs to take over: the transaction being
/// verified plus the credential bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkHandoff {
    /// Transaction being verified.
    pub transaction_id: String,
    /// Credential bundle for SDK initialization.
    pub credentials: SdkCredentials,
}

impl SdkHandoff {
    /// Assembles the handoff bundle from a completed session.
    ///
    /// # Errors
    /// Returns `DomainError::EmptyTransactionId` if no transaction was
    /// created, or `DomainError::MissingCredential` naming the first
    /// credential field still unset.
    pub fn from_session(session: &SessionState) -> DomainResult<Self> {
        if !session.has_transaction() {
            return Err(DomainError::EmptyTransactionId);
        }

        let certificate = session
            .certificate
            .clone()
            .ok_or(DomainError::MissingCredential("certificate"))?;
        let device_key_identifier = session
            .device_key_identifier
            .clone()
            .ok_or(DomainError::MissingCredential("device_key_identifier"))?;
        let production_key_text = session
            .production_key_text
            .clone()
            .ok_or(DomainError::MissingCredential("production_key_text"))?;

        Ok(Self {
            transaction_id: session.transaction_id.clone(),
            credentials: SdkCredentials {
                certificate,
                device_key_identifier,
                production_key_text,
            },
        })
    }
}
