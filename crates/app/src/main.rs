//! Veriface CLI - Main Entry Point
//!
//! Runs one login/verification flow end to end: main data, CPF
//! authentication, transaction status, SDK credentials, and finally the
//! handoff decision. The face-verification SDK itself is external; this
//! binary stops at reporting that the handoff bundle is ready.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use veriface_application::{FlowEventSink, HandoffCoordinator, LoginFlow};
use veriface_domain::Cpf;
use veriface_infrastructure::{RestWorker, WorkerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cpf_input = std::env::args()
        .nth(1)
        .ok_or("usage: veriface <cpf>")?;
    let cpf = Cpf::new(&cpf_input)?;
    if !cpf.has_valid_check_digits() {
        tracing::warn!(cpf = %cpf.masked(), "CPF fails the registry check digits; sending anyway");
    }

    let config = WorkerConfig::from_env();
    tracing::info!(
        base_url = %config.base_url,
        "Starting Veriface login flow v{}",
        env!("CARGO_PKG_VERSION")
    );

    let worker = RestWorker::new(&config)?;
    let coordinator = Arc::new(HandoffCoordinator::new());
    let mut flow = LoginFlow::new(worker, Arc::clone(&coordinator) as Arc<dyn FlowEventSink>);

    flow.fetch_main_data().await?;
    flow.authenticate_by_cpf(&cpf).await?;
    flow.fetch_credentials().await?;

    if coordinator.should_launch_sdk() {
        let handoff = flow.sdk_handoff()?;
        coordinator.mark_launched();
        tracing::info!(
            transaction_id = %handoff.transaction_id,
            "handing control to the face-verification SDK"
        );
    }

    if let Some((transaction_id, status)) = coordinator.latest_status() {
        tracing::info!(transaction_id = %transaction_id, status = %status, "transaction status");
    }

    Ok(())
}
