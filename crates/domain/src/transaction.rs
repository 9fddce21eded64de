//! Transaction and main-data types
//!
//! Decoded shapes of the backend's responses, expressed in domain terms.
//! The backend wraps most payloads in a list and the flow only ever uses
//! the first element, so each wrapper exposes a `first_*` accessor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the main-data payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainEntry {
    /// Bearer token granted for subsequent calls.
    pub access_token: String,
}

/// The main-data payload: a list of entries, first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainData {
    /// Entries as returned by the backend.
    pub entries: Vec<MainEntry>,
}

impl MainData {
    /// Returns the access token of the first entry, if any.
    #[must_use]
    pub fn first_token(&self) -> Option<&str> {
        self.entries.first().map(|e| e.access_token.as_str())
    }
}

/// Receipt for a newly created transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Transaction identifiers issued by the backend.
    pub transaction_ids: Vec<String>,
    /// When the receipt was obtained.
    pub obtained_at: DateTime<Utc>,
}

impl TransactionReceipt {
    /// Creates a receipt stamped with the current time.
    #[must_use]
    pub fn new(transaction_ids: Vec<String>) -> Self {
        Self {
            transaction_ids,
            obtained_at: Utc::now(),
        }
    }

    /// Returns the first issued identifier, if any.
    #[must_use]
    pub fn first_id(&self) -> Option<&str> {
        self.transaction_ids.first().map(String::as_str)
    }
}

/// Processing status of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    /// Numeric status code assigned by the backend.
    pub status: i64,
    /// Human-readable description (e.g. "APPROVED").
    pub status_description: String,
}

/// Status payload: a result list, first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Status entries as returned by the backend.
    pub results: Vec<TransactionStatus>,
}

impl StatusReport {
    /// Returns the first status entry, if any.
    #[must_use]
    pub fn first(&self) -> Option<&TransactionStatus> {
        self.results.first()
    }
}
