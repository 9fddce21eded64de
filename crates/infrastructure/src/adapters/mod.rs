//! Port adapters
//!
//! Concrete implementations of the application-layer ports.

mod rest_worker;

pub use rest_worker::RestWorker;
