//! Flow stage machine
//!
//! The login flow advances through a fixed sequence of stages, one per
//! successful remote call. The stage only moves forward; a failed call
//! leaves it where it was. Operations check the stage before running so
//! the implicit call ordering (token before transaction, transaction
//! before status and credentials) becomes an explicit, testable rule.

use serde::{Deserialize, Serialize};

/// Progress of a login/verification attempt.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    /// Nothing has happened yet.
    #[default]
    Idle,
    /// The access token was obtained from the main-data endpoint.
    MainDataFetched,
    /// A transaction was created for the user's CPF.
    Authenticated,
    /// The transaction's processing status was retrieved.
    TransactionVerified,
    /// SDK credentials are stored and the handoff bundle can be built.
    CredentialsReady,
}

impl FlowStage {
    /// True once an access token is available for authenticated calls.
    #[must_use]
    pub fn can_authenticate(self) -> bool {
        self >= Self::MainDataFetched
    }

    /// True once a transaction exists for status/credential calls.
    #[must_use]
    pub fn can_verify_transaction(self) -> bool {
        self >= Self::Authenticated
    }

    /// True once a transaction exists, so credentials may be fetched.
    #[must_use]
    pub fn can_fetch_credentials(self) -> bool {
        self >= Self::Authenticated
    }

    /// Advances to `next` if it is further along; never moves backward.
    pub fn advance_to(&mut self, next: Self) {
        if next > *self {
            *self = next;
        }
    }
}

impl std::fmt::Display for FlowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::MainDataFetched => "main data fetched",
            Self::Authenticated => "authenticated",
            Self::TransactionVerified => "transaction verified",
            Self::CredentialsReady => "credentials ready",
        };
        f.write_str(name)
    }
}
