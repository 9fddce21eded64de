//! Wire payload types
//!
//! Serde shapes of the backend's JSON responses, converted into domain
//! types at the adapter boundary. Field names follow the backend's
//! camelCase convention.

use serde::Deserialize;
use veriface_domain::{MainData, MainEntry, SdkCredentials, StatusReport, TransactionStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MainDataEnvelope {
    #[serde(default)]
    pub objects: Vec<MainDataEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MainDataEntry {
    pub access_token: String,
}

impl From<MainDataEnvelope> for MainData {
    fn from(envelope: MainDataEnvelope) -> Self {
        Self {
            entries: envelope
                .objects
                .into_iter()
                .map(|entry| MainEntry {
                    access_token: entry.access_token,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionEnvelope {
    #[serde(default)]
    pub objects: Vec<TransactionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionEntry {
    // The backend issues numeric IDs; the flow carries them as strings.
    pub transaction_id: i64,
}

impl TransactionEnvelope {
    pub(crate) fn into_ids(self) -> Vec<String> {
        self.objects
            .into_iter()
            .map(|entry| entry.transaction_id.to_string())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusEnvelope {
    #[serde(default)]
    pub result: Vec<StatusEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusEntry {
    pub status: i64,
    pub status_description: String,
}

impl From<StatusEnvelope> for StatusReport {
    fn from(envelope: StatusEnvelope) -> Self {
        Self {
            results: envelope
                .result
                .into_iter()
                .map(|entry| TransactionStatus {
                    status: entry.status,
                    status_description: entry.status_description,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CredentialsEnvelope {
    pub certificate: String,
    pub device_key_identifier: String,
    pub production_key_text: String,
}

impl From<CredentialsEnvelope> for SdkCredentials {
    fn from(envelope: CredentialsEnvelope) -> Self {
        Self {
            certificate: envelope.certificate,
            device_key_identifier: envelope.device_key_identifier,
            production_key_text: envelope.production_key_text,
        }
    }
}

/// Body of the transaction-creation request.
#[derive(Debug, serde::Serialize)]
pub(crate) struct CreateTransactionRequest<'a> {
    pub cpf: &'a str,
}
