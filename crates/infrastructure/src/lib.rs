//! Veriface Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer: the reqwest-backed verification worker and its
//! configuration.

pub mod adapters;
pub mod config;
mod wire;

pub use adapters::RestWorker;
pub use config::{ConfigError, WorkerConfig};
