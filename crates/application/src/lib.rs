//! Veriface Application - Login flow orchestration
//!
//! This crate sequences the four remote calls of the login flow (main
//! data, CPF authentication, transaction status, SDK credentials) and
//! threads session state between them. External systems are reached only
//! through ports: the verification worker performs the actual network
//! calls, the event sink receives navigation-relevant events.

pub mod error;
pub mod flow;
pub mod ports;

pub use error::{FlowError, FlowResult};
pub use flow::{HandoffCoordinator, LoginFlow};
pub use ports::{FlowEventSink, NullEventSink, VerificationWorker, WorkerError};
