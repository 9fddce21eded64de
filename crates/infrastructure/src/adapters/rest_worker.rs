//! REST worker adapter
//!
//! Implements the `VerificationWorker` port over `reqwest`. Owns the
//! bearer-token state, maps transport failures onto the worker error
//! taxonomy, and decodes the backend's JSON envelopes into domain types.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;
use veriface_application::ports::{VerificationWorker, WorkerError};
use veriface_domain::{Cpf, MainData, SdkCredentials, StatusReport, TransactionReceipt};

use crate::config::{ConfigError, WorkerConfig};
use crate::wire::{
    CreateTransactionRequest, CredentialsEnvelope, MainDataEnvelope, StatusEnvelope,
    TransactionEnvelope,
};

/// `VerificationWorker` implementation over HTTP.
pub struct RestWorker {
    client: Client,
    config: WorkerConfig,
    access_token: RwLock<Option<String>>,
    cancel_tx: watch::Sender<bool>,
}

impl RestWorker {
    /// Creates a worker for the given configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &WorkerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ConfigError::ClientBuild(e.to_string()))?;

        let (cancel_tx, _) = watch::channel(false);

        Ok(Self {
            client,
            config: config.clone(),
            access_token: RwLock::new(None),
            cancel_tx,
        })
    }

    /// Builds a request for `path`, attaching the bearer token when one
    /// has been set.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.config.endpoint(path));

        let token = self.access_token.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = token.as_deref() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Sends a request and decodes a JSON response, racing it against the
    /// cancellation flag.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<T, WorkerError> {
        let mut cancel_rx = self.cancel_tx.subscribe();
        if *cancel_rx.borrow() {
            return Err(WorkerError::Cancelled);
        }

        let request_id = Uuid::now_v7();
        debug!(request_id = %request_id, operation, "sending request");

        let response = tokio::select! {
            sent = builder.send() => sent.map_err(map_transport_error)?,
            _ = cancel_rx.changed() => return Err(WorkerError::Cancelled),
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WorkerError::ServerError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WorkerError::Decode(e.to_string()))
    }
}

/// Maps transport-level `reqwest` failures onto the worker taxonomy.
///
/// Anything that is not a timeout or a decode problem means the backend
/// was never (fully) reached, so it lands in `NoConnection`.
fn map_transport_error(error: reqwest::Error) -> WorkerError {
    if error.is_timeout() {
        return WorkerError::TimedOut(error.to_string());
    }
    if error.is_decode() {
        return WorkerError::Decode(error.to_string());
    }
    WorkerError::NoConnection(error.to_string())
}

#[async_trait]
impl VerificationWorker for RestWorker {
    async fn fetch_main_data(&self) -> Result<MainData, WorkerError> {
        let envelope: MainDataEnvelope = self
            .execute("fetch_main_data", self.request(Method::GET, "main-data"))
            .await?;
        Ok(envelope.into())
    }

    async fn create_transaction(&self, cpf: &Cpf) -> Result<TransactionReceipt, WorkerError> {
        let builder = self
            .request(Method::POST, "transactions")
            .json(&CreateTransactionRequest { cpf: cpf.as_str() });

        let envelope: TransactionEnvelope = self.execute("create_transaction", builder).await?;
        Ok(TransactionReceipt::new(envelope.into_ids()))
    }

    async fn transaction_status(&self, transaction_id: &str) -> Result<StatusReport, WorkerError> {
        let path = format!("transactions/{transaction_id}");
        let envelope: StatusEnvelope = self
            .execute("transaction_status", self.request(Method::GET, &path))
            .await?;
        Ok(envelope.into())
    }

    async fn fetch_credentials(&self) -> Result<SdkCredentials, WorkerError> {
        let envelope: CredentialsEnvelope = self
            .execute("fetch_credentials", self.request(Method::GET, "credentials"))
            .await?;
        Ok(envelope.into())
    }

    fn set_access_token(&self, token: &str) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    async fn cancel_all(&self) {
        self.cancel_tx.send_replace(true);
    }
}
