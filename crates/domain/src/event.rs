//! Flow events
//!
//! Emitted by the orchestrator when a screen transition becomes possible.
//! The UI layer (or a coordinator standing in for it) subscribes through
//! an event-sink port instead of being called back directly, so network
//! completion stays decoupled from navigation.

use serde::{Deserialize, Serialize};

/// Navigation-relevant moments in the login flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FlowEvent {
    /// A transaction exists; the face-verification SDK may be opened.
    SdkReady {
        /// The transaction the SDK will verify.
        transaction_id: String,
    },
    /// The transaction's processing status is known; the status view may
    /// be opened.
    StatusReady {
        /// The transaction the status belongs to.
        transaction_id: String,
        /// Human-readable status description.
        status_description: String,
    },
}

impl FlowEvent {
    /// Returns the transaction ID the event refers to.
    #[must_use]
    pub fn transaction_id(&self) -> &str {
        match self {
            Self::SdkReady { transaction_id }
            | Self::StatusReady { transaction_id, .. } => transaction_id,
        }
    }
}
