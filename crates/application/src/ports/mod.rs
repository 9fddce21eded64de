//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait that can be implemented by adapters in
//! the infrastructure layer.

mod events;
mod worker;

pub use events::{FlowEventSink, NullEventSink};
pub use worker::{VerificationWorker, WorkerError};
