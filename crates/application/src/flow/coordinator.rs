//! SDK handoff coordinator
//!
//! Sits between the orchestrator and the external face-verification SDK.
//! The orchestrator only emits events; this coordinator collects them and
//! answers the one question the caller has: should the SDK be opened now?
//! Keeping that decision out of the network completion path means the flow
//! can be tested without a live SDK.

use std::sync::Mutex;
use std::sync::PoisonError;

use tracing::info;
use veriface_domain::FlowEvent;

use crate::ports::FlowEventSink;

/// Event sink that tracks SDK-handoff readiness.
#[derive(Debug, Default)]
pub struct HandoffCoordinator {
    events: Mutex<Vec<FlowEvent>>,
    launched: Mutex<bool>,
}

impl HandoffCoordinator {
    /// Creates an empty coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `SdkReady` has been received and the SDK has not been
    /// launched yet.
    #[must_use]
    pub fn should_launch_sdk(&self) -> bool {
        let launched = *self.launched.lock().unwrap_or_else(PoisonError::into_inner);
        if launched {
            return false;
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| matches!(e, FlowEvent::SdkReady { .. }))
    }

    /// Records that the SDK was handed control.
    pub fn mark_launched(&self) {
        *self.launched.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }

    /// Latest known status description, with its transaction ID.
    #[must_use]
    pub fn latest_status(&self) -> Option<(String, String)> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find_map(|e| match e {
                FlowEvent::StatusReady {
                    transaction_id,
                    status_description,
                } => Some((transaction_id.clone(), status_description.clone())),
                FlowEvent::SdkReady { .. } => None,
            })
    }

    /// Number of `SdkReady` events received so far.
    #[must_use]
    pub fn sdk_ready_count(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| matches!(e, FlowEvent::SdkReady { .. }))
            .count()
    }

    /// Drains and returns every recorded event.
    pub fn take_events(&self) -> Vec<FlowEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl FlowEventSink for HandoffCoordinator {
    fn emit(&self, event: FlowEvent) {
        match &event {
            FlowEvent::SdkReady { transaction_id } => {
                info!(transaction_id = %transaction_id, "SDK handoff is ready");
            }
            FlowEvent::StatusReady {
                transaction_id,
                status_description,
            } => {
                info!(
                    transaction_id = %transaction_id,
                    status = %status_description,
                    "status view is ready"
                );
            }
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
