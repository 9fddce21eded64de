//! Login flow orchestrator
//!
//! Sequences the four remote calls of the login flow and threads session
//! state between them. Each operation checks the flow stage first, runs
//! one worker call, and mutates state only on success; any failure is
//! returned to the caller with the session left exactly as it was.

mod coordinator;

pub use coordinator::HandoffCoordinator;

use std::sync::Arc;

use tracing::{info, warn};
use veriface_domain::{Cpf, DomainError, FlowEvent, FlowStage, SdkHandoff, SessionState};

use crate::error::{FlowError, FlowResult};
use crate::ports::{FlowEventSink, VerificationWorker, WorkerError};

/// Orchestrates one login/verification attempt.
///
/// The flow owns its session state and advances through
/// `Idle → MainDataFetched → Authenticated → TransactionVerified →
/// CredentialsReady`, one stage per successful call. Events that enable a
/// screen transition are pushed through the event sink supplied at
/// construction; errors are returned, never swallowed.
pub struct LoginFlow<W> {
    worker: W,
    events: Arc<dyn FlowEventSink>,
    session: SessionState,
    stage: FlowStage,
}

impl<W: VerificationWorker> LoginFlow<W> {
    /// Creates a flow over the given worker and event sink.
    pub fn new(worker: W, events: Arc<dyn FlowEventSink>) -> Self {
        Self {
            worker,
            events,
            session: SessionState::new(),
            stage: FlowStage::Idle,
        }
    }

    /// Returns the accumulated session state.
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Returns the current flow stage.
    pub const fn stage(&self) -> FlowStage {
        self.stage
    }

    /// Returns the underlying worker.
    pub const fn worker(&self) -> &W {
        &self.worker
    }

    /// Fetches the main data and stores the first entry's access token.
    ///
    /// The token goes into the session and into the worker, so subsequent
    /// calls are authenticated. Safe to call again: an identical success
    /// leaves the state identical.
    ///
    /// # Errors
    /// Any worker failure, or `WorkerError::Decode` when the listing has
    /// no entries. The session is unchanged on error.
    pub async fn fetch_main_data(&mut self) -> FlowResult<()> {
        let data = self.worker.fetch_main_data().await.inspect_err(|err| {
            warn!(error = %err, "main-data fetch failed");
        })?;

        let token = data
            .first_token()
            .ok_or_else(|| WorkerError::Decode("main data contained no entries".to_string()))?
            .to_string();

        self.session.access_token = token.clone();
        self.worker.set_access_token(&token);
        self.stage.advance_to(FlowStage::MainDataFetched);
        info!("access token obtained");
        Ok(())
    }

    /// Creates a verification transaction for `cpf`, then immediately
    /// checks its status.
    ///
    /// On success the first transaction ID is stored, `SdkReady` is
    /// emitted, and exactly one status check runs for the new ID. A
    /// failure of that chained check is returned to the caller; the
    /// transaction itself remains created and `verify_transaction` can be
    /// retried alone.
    ///
    /// # Errors
    /// `FlowError::OutOfOrder` before `fetch_main_data` has succeeded;
    /// otherwise any worker failure. The session is unchanged when the
    /// transaction call itself fails.
    pub async fn authenticate_by_cpf(&mut self, cpf: &Cpf) -> FlowResult<()> {
        if !self.stage.can_authenticate() {
            return Err(FlowError::OutOfOrder {
                operation: "authenticate_by_cpf",
                stage: self.stage,
            });
        }

        let receipt = self.worker.create_transaction(cpf).await.inspect_err(|err| {
            warn!(cpf = %cpf.masked(), error = %err, "transaction creation failed");
        })?;

        let transaction_id = receipt
            .first_id()
            .ok_or_else(|| {
                WorkerError::Decode("transaction receipt contained no identifiers".to_string())
            })?
            .to_string();

        self.session.transaction_id = transaction_id.clone();
        self.stage.advance_to(FlowStage::Authenticated);
        info!(transaction_id = %transaction_id, "transaction created");

        self.events.emit(FlowEvent::SdkReady {
            transaction_id: transaction_id.clone(),
        });

        self.verify_transaction(&transaction_id).await
    }

    /// Checks the processing status of `transaction_id` once and stores
    /// the first result's description.
    ///
    /// # Errors
    /// `DomainError::EmptyTransactionId` for an empty ID (the worker is
    /// not called), `FlowError::OutOfOrder` before a transaction exists,
    /// otherwise any worker failure. The session is unchanged on error.
    pub async fn verify_transaction(&mut self, transaction_id: &str) -> FlowResult<()> {
        if transaction_id.is_empty() {
            return Err(DomainError::EmptyTransactionId.into());
        }
        if !self.stage.can_verify_transaction() {
            return Err(FlowError::OutOfOrder {
                operation: "verify_transaction",
                stage: self.stage,
            });
        }

        let report = self
            .worker
            .transaction_status(transaction_id)
            .await
            .inspect_err(|err| {
                warn!(transaction_id, error = %err, "status check failed");
            })?;

        let status = report
            .first()
            .ok_or_else(|| WorkerError::Decode("status report contained no results".to_string()))?;

        self.session.status_description = Some(status.status_description.clone());
        self.stage.advance_to(FlowStage::TransactionVerified);
        info!(transaction_id, status = %status.status_description, "transaction status stored");

        self.events.emit(FlowEvent::StatusReady {
            transaction_id: transaction_id.to_string(),
            status_description: status.status_description.clone(),
        });
        Ok(())
    }

    /// Fetches the SDK credential bundle and stores it in the session.
    ///
    /// # Errors
    /// `FlowError::OutOfOrder` before a transaction exists, otherwise any
    /// worker failure. The session is unchanged on error.
    pub async fn fetch_credentials(&mut self) -> FlowResult<()> {
        if !self.stage.can_fetch_credentials() {
            return Err(FlowError::OutOfOrder {
                operation: "fetch_credentials",
                stage: self.stage,
            });
        }

        let credentials = self.worker.fetch_credentials().await.inspect_err(|err| {
            warn!(error = %err, "credential fetch failed");
        })?;

        self.session.store_credentials(credentials);
        self.stage.advance_to(FlowStage::CredentialsReady);
        info!("SDK credentials stored");
        Ok(())
    }

    /// Assembles the bundle handed to the face-verification SDK.
    ///
    /// # Errors
    /// `FlowError::Domain` naming what is still missing.
    pub fn sdk_handoff(&self) -> FlowResult<SdkHandoff> {
        SdkHandoff::from_session(&self.session).map_err(FlowError::from)
    }

    /// Cancels in-flight worker calls (best effort).
    pub async fn cancel(&self) {
        self.worker.cancel_all().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use veriface_domain::{
        MainData, MainEntry, SdkCredentials, StatusReport, TransactionReceipt, TransactionStatus,
    };

    /// Worker double with scripted responses and recorded interactions.
    struct MockWorker {
        main_data: Result<MainData, WorkerError>,
        transaction: Result<TransactionReceipt, WorkerError>,
        status: Result<StatusReport, WorkerError>,
        credentials: Result<SdkCredentials, WorkerError>,
        token: Mutex<Option<String>>,
        status_calls: Mutex<Vec<String>>,
        cancelled: Mutex<bool>,
    }

    impl MockWorker {
        /// A worker where every call succeeds with the canonical payloads.
        fn happy() -> Self {
            Self {
                main_data: Ok(MainData {
                    entries: vec![
                        MainEntry {
                            access_token: "T1".to_string(),
                        },
                        MainEntry {
                            access_token: "T2".to_string(),
                        },
                    ],
                }),
                transaction: Ok(TransactionReceipt::new(vec!["42".to_string()])),
                status: Ok(StatusReport {
                    results: vec![TransactionStatus {
                        status: 1,
                        status_description: "APPROVED".to_string(),
                    }],
                }),
                credentials: Ok(SdkCredentials {
                    certificate: "C".to_string(),
                    device_key_identifier: "D".to_string(),
                    production_key_text: "P".to_string(),
                }),
                token: Mutex::new(None),
                status_calls: Mutex::new(Vec::new()),
                cancelled: Mutex::new(false),
            }
        }

        fn recorded_token(&self) -> Option<String> {
            self.token.lock().expect("Lock poisoned").clone()
        }

        fn recorded_status_calls(&self) -> Vec<String> {
            self.status_calls.lock().expect("Lock poisoned").clone()
        }
    }

    #[async_trait::async_trait]
    impl VerificationWorker for MockWorker {
        async fn fetch_main_data(&self) -> Result<MainData, WorkerError> {
            self.main_data.clone()
        }

        async fn create_transaction(
            &self,
            _cpf: &Cpf,
        ) -> Result<TransactionReceipt, WorkerError> {
            self.transaction.clone()
        }

        async fn transaction_status(
            &self,
            transaction_id: &str,
        ) -> Result<StatusReport, WorkerError> {
            self.status_calls
                .lock()
                .expect("Lock poisoned")
                .push(transaction_id.to_string());
            self.status.clone()
        }

        async fn fetch_credentials(&self) -> Result<SdkCredentials, WorkerError> {
            self.credentials.clone()
        }

        fn set_access_token(&self, token: &str) {
            *self.token.lock().expect("Lock poisoned") = Some(token.to_string());
        }

        async fn cancel_all(&self) {
            *self.cancelled.lock().expect("Lock poisoned") = true;
        }
    }

    /// Sink recording every event it receives.
    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<FlowEvent>>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<FlowEvent> {
            self.events.lock().expect("Lock poisoned").clone()
        }
    }

    impl FlowEventSink for RecordingSink {
        fn emit(&self, event: FlowEvent) {
            self.events.lock().expect("Lock poisoned").push(event);
        }
    }

    fn cpf() -> Cpf {
        Cpf::new("12345678900").expect("valid length")
    }

    fn flow_with(worker: MockWorker) -> (LoginFlow<MockWorker>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let flow = LoginFlow::new(worker, Arc::clone(&sink) as Arc<dyn FlowEventSink>);
        (flow, sink)
    }

    fn failure_variants() -> Vec<WorkerError> {
        vec![
            WorkerError::NoConnection("offline".to_string()),
            WorkerError::ServerError {
                status_code: 500,
                message: "boom".to_string(),
            },
            WorkerError::TimedOut("deadline exceeded".to_string()),
            WorkerError::Decode("bad payload".to_string()),
            WorkerError::Cancelled,
        ]
    }

    #[tokio::test]
    async fn test_happy_path_threads_state_through_all_calls() {
        let (mut flow, sink) = flow_with(MockWorker::happy());

        flow.fetch_main_data().await.expect("main data");
        assert_eq!(flow.session().access_token, "T1");
        assert_eq!(flow.worker().recorded_token().as_deref(), Some("T1"));
        assert_eq!(flow.stage(), FlowStage::MainDataFetched);

        flow.authenticate_by_cpf(&cpf()).await.expect("authenticate");
        assert_eq!(flow.session().transaction_id, "42");
        assert_eq!(flow.worker().recorded_status_calls(), vec!["42".to_string()]);
        assert_eq!(
            flow.session().status_description.as_deref(),
            Some("APPROVED")
        );
        assert_eq!(flow.stage(), FlowStage::TransactionVerified);

        flow.fetch_credentials().await.expect("credentials");
        assert_eq!(flow.session().certificate.as_deref(), Some("C"));
        assert_eq!(
            flow.session().device_key_identifier.as_deref(),
            Some("D")
        );
        assert_eq!(
            flow.session().production_key_text.as_deref(),
            Some("P")
        );
        assert_eq!(flow.stage(), FlowStage::CredentialsReady);

        let handoff = flow.sdk_handoff().expect("handoff");
        assert_eq!(handoff.transaction_id, "42");
        assert_eq!(handoff.credentials.certificate, "C");

        assert_eq!(
            sink.events(),
            vec![
                FlowEvent::SdkReady {
                    transaction_id: "42".to_string(),
                },
                FlowEvent::StatusReady {
                    transaction_id: "42".to_string(),
                    status_description: "APPROVED".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_main_data_failure_leaves_state_unchanged() {
        for error in failure_variants() {
            let mut worker = MockWorker::happy();
            worker.main_data = Err(error.clone());
            let (mut flow, _) = flow_with(worker);
            let before = flow.session().clone();

            let result = flow.fetch_main_data().await;

            assert_eq!(result, Err(FlowError::Worker(error)));
            assert_eq!(flow.session(), &before);
            assert_eq!(flow.stage(), FlowStage::Idle);
            assert_eq!(flow.worker().recorded_token(), None);
        }
    }

    #[tokio::test]
    async fn test_authenticate_failure_leaves_state_unchanged() {
        for error in failure_variants() {
            let mut worker = MockWorker::happy();
            worker.transaction = Err(error.clone());
            let (mut flow, sink) = flow_with(worker);
            flow.fetch_main_data().await.expect("main data");
            let before = flow.session().clone();

            let result = flow.authenticate_by_cpf(&cpf()).await;

            assert_eq!(result, Err(FlowError::Worker(error)));
            assert_eq!(flow.session(), &before);
            assert_eq!(flow.stage(), FlowStage::MainDataFetched);
            assert!(sink.events().is_empty());
            assert!(flow.worker().recorded_status_calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_credentials_failure_leaves_state_unchanged() {
        for error in failure_variants() {
            let mut worker = MockWorker::happy();
            worker.credentials = Err(error.clone());
            let (mut flow, _) = flow_with(worker);
            flow.fetch_main_data().await.expect("main data");
            flow.authenticate_by_cpf(&cpf()).await.expect("authenticate");
            let before = flow.session().clone();

            let result = flow.fetch_credentials().await;

            assert_eq!(result, Err(FlowError::Worker(error)));
            assert_eq!(flow.session(), &before);
            assert_eq!(flow.stage(), FlowStage::TransactionVerified);
        }
    }

    #[tokio::test]
    async fn test_chained_status_failure_keeps_transaction() {
        let mut worker = MockWorker::happy();
        worker.status = Err(WorkerError::TimedOut("deadline exceeded".to_string()));
        let (mut flow, sink) = flow_with(worker);
        flow.fetch_main_data().await.expect("main data");

        let result = flow.authenticate_by_cpf(&cpf()).await;

        // The transaction was created; only the chained status check failed.
        assert!(matches!(
            result,
            Err(FlowError::Worker(WorkerError::TimedOut(_)))
        ));
        assert_eq!(flow.session().transaction_id, "42");
        assert_eq!(flow.session().status_description, None);
        assert_eq!(flow.stage(), FlowStage::Authenticated);
        assert_eq!(
            sink.events(),
            vec![FlowEvent::SdkReady {
                transaction_id: "42".to_string(),
            }]
        );
        assert_eq!(flow.worker().recorded_status_calls(), vec!["42".to_string()]);
    }

    #[tokio::test]
    async fn test_main_data_is_idempotent() {
        let (mut flow, _) = flow_with(MockWorker::happy());

        flow.fetch_main_data().await.expect("first");
        let after_first = flow.session().clone();
        flow.fetch_main_data().await.expect("second");

        assert_eq!(flow.session(), &after_first);
        assert_eq!(flow.stage(), FlowStage::MainDataFetched);
    }

    #[tokio::test]
    async fn test_empty_main_data_is_decode_failure() {
        let mut worker = MockWorker::happy();
        worker.main_data = Ok(MainData::default());
        let (mut flow, _) = flow_with(worker);

        let result = flow.fetch_main_data().await;

        assert!(matches!(
            result,
            Err(FlowError::Worker(WorkerError::Decode(_)))
        ));
        assert_eq!(flow.session(), &SessionState::new());
    }

    #[tokio::test]
    async fn test_authenticate_requires_main_data() {
        let (mut flow, _) = flow_with(MockWorker::happy());

        let result = flow.authenticate_by_cpf(&cpf()).await;

        assert_eq!(
            result,
            Err(FlowError::OutOfOrder {
                operation: "authenticate_by_cpf",
                stage: FlowStage::Idle,
            })
        );
    }

    #[tokio::test]
    async fn test_verify_rejects_empty_transaction_id() {
        let (mut flow, _) = flow_with(MockWorker::happy());
        flow.fetch_main_data().await.expect("main data");

        let result = flow.verify_transaction("").await;

        assert_eq!(
            result,
            Err(FlowError::Domain(DomainError::EmptyTransactionId))
        );
        assert!(flow.worker().recorded_status_calls().is_empty());
    }

    #[tokio::test]
    async fn test_verify_requires_authentication() {
        let (mut flow, _) = flow_with(MockWorker::happy());
        flow.fetch_main_data().await.expect("main data");

        let result = flow.verify_transaction("42").await;

        assert_eq!(
            result,
            Err(FlowError::OutOfOrder {
                operation: "verify_transaction",
                stage: FlowStage::MainDataFetched,
            })
        );
        assert!(flow.worker().recorded_status_calls().is_empty());
    }

    #[tokio::test]
    async fn test_credentials_require_authentication() {
        let (mut flow, _) = flow_with(MockWorker::happy());
        flow.fetch_main_data().await.expect("main data");

        let result = flow.fetch_credentials().await;

        assert_eq!(
            result,
            Err(FlowError::OutOfOrder {
                operation: "fetch_credentials",
                stage: FlowStage::MainDataFetched,
            })
        );
    }

    #[tokio::test]
    async fn test_handoff_before_credentials_names_the_gap() {
        let (mut flow, _) = flow_with(MockWorker::happy());
        flow.fetch_main_data().await.expect("main data");
        flow.authenticate_by_cpf(&cpf()).await.expect("authenticate");

        let result = flow.sdk_handoff();

        assert_eq!(
            result,
            Err(FlowError::Domain(DomainError::MissingCredential(
                "certificate"
            )))
        );
    }

    #[tokio::test]
    async fn test_cancel_reaches_worker() {
        use crate::ports::NullEventSink;

        let flow = LoginFlow::new(MockWorker::happy(), Arc::new(NullEventSink));
        flow.cancel().await;
        assert!(*flow.worker().cancelled.lock().expect("Lock poisoned"));
    }
}
