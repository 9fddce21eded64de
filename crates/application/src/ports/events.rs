//! Flow event sink port
//!
//! The orchestrator reports navigation-relevant moments through this
//! interface instead of holding a reference back into the UI. Sinks must
//! not block: `emit` is called from inside the flow's async operations.

use veriface_domain::FlowEvent;

/// Receiver for flow events.
pub trait FlowEventSink: Send + Sync {
    /// Delivers one event. Implementations decide what, if anything, to
    /// do with it (log it, queue a screen transition, hand off to the
    /// SDK coordinator).
    fn emit(&self, event: FlowEvent);
}

/// A sink that drops every event. Useful for flows driven purely by
/// return values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl FlowEventSink for NullEventSink {
    fn emit(&self, _event: FlowEvent) {}
}
