//! Operation orchestrator — owns the status state machine, validates artifact
//! selections, drives one service request at a time and hands the result back
//! to the caller.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{EncrypterApi, ProgressSink};
use crate::error::SubmitError;
use crate::models::algorithm::EncryptionAlgorithm;
use crate::models::artifact::{ArtifactFile, ArtifactSelection, ArtifactSlot, OperationKind};
use crate::models::settings::Locale;
use crate::models::status::{OperationResult, OperationStatus, ProgressFraction};
use crate::services::messages::Messages;
use crate::services::request_builder;

/// Observer for status transitions, including every progress update.
///
/// Statuses are delivered one at a time, in the order they were applied.
/// Called after the orchestrator has released its state, so implementations
/// may read the orchestrator back, but must not mutate it.
pub trait StatusListener: Send + Sync {
    fn on_status(&self, status: &OperationStatus);
}

struct Session {
    kind: OperationKind,
    selection: ArtifactSelection,
    status: OperationStatus,
    /// Id of the request currently in flight; cleared on completion or reset.
    active_operation: Option<String>,
}

impl Session {
    fn reset(&mut self) {
        if let Some(op) = self.active_operation.take() {
            log::info!("Operation {} superseded by reset", op);
        }
        self.selection.clear_files();
        self.status = OperationStatus::Idle;
    }
}

struct Shared {
    session: Mutex<Session>,
    /// Held from a status change until its listener call returns.
    delivery: Mutex<()>,
    listener: Option<Arc<dyn StatusListener>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply `change` to the session and deliver the status it yields before
    /// any other change can be applied.
    fn transition<T>(
        &self,
        change: impl FnOnce(&mut Session) -> (T, Option<OperationStatus>),
    ) -> T {
        let _delivery = self
            .delivery
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let (value, status) = {
            let mut session = self.lock();
            change(&mut *session)
        };
        if let (Some(listener), Some(status)) = (&self.listener, status) {
            listener.on_status(&status);
        }
        value
    }

    /// Raise the in-flight progress. Stale operations and non-increasing
    /// values are ignored.
    fn report_progress(&self, operation_id: &str, fraction: ProgressFraction) {
        self.transition(|session| {
            if session.active_operation.as_deref() != Some(operation_id) {
                return ((), None);
            }
            match &mut session.status {
                OperationStatus::Processing { progress, .. } if fraction > *progress => {
                    *progress = fraction;
                }
                _ => return ((), None),
            }
            log::debug!("Operation {} progress {}%", operation_id, fraction.value());
            ((), Some(session.status.clone()))
        })
    }

    /// Move the operation to a terminal status. Returns false if it was superseded.
    fn complete(&self, operation_id: &str, status: OperationStatus) -> bool {
        self.transition(|session| {
            if session.active_operation.as_deref() != Some(operation_id) {
                return (false, None);
            }
            session.active_operation = None;
            session.status = status.clone();
            (true, Some(status))
        })
    }
}

pub struct Orchestrator<A: EncrypterApi> {
    api: A,
    messages: Messages,
    shared: Arc<Shared>,
}

impl<A: EncrypterApi> Orchestrator<A> {
    pub fn new(api: A, locale: Locale) -> Self {
        Self::build(api, locale, None)
    }

    pub fn with_listener(api: A, locale: Locale, listener: Arc<dyn StatusListener>) -> Self {
        Self::build(api, locale, Some(listener))
    }

    fn build(api: A, locale: Locale, listener: Option<Arc<dyn StatusListener>>) -> Self {
        Self {
            api,
            messages: Messages::new(locale),
            shared: Arc::new(Shared {
                session: Mutex::new(Session {
                    kind: OperationKind::Encrypt,
                    selection: ArtifactSelection::default(),
                    status: OperationStatus::Idle,
                    active_operation: None,
                }),
                delivery: Mutex::new(()),
                listener,
            }),
        }
    }

    #[cfg(test)]
    fn api(&self) -> &A {
        &self.api
    }

    pub fn status(&self) -> OperationStatus {
        self.shared.lock().status.clone()
    }

    pub fn progress(&self) -> ProgressFraction {
        self.shared.lock().status.progress()
    }

    pub fn kind(&self) -> OperationKind {
        self.shared.lock().kind
    }

    pub fn algorithm(&self) -> EncryptionAlgorithm {
        self.shared.lock().selection.algorithm
    }

    pub fn compress(&self) -> bool {
        self.shared.lock().selection.compress
    }

    /// Name of the file currently selected for `slot`, if any.
    pub fn selected(&self, slot: ArtifactSlot) -> Option<String> {
        self.shared
            .lock()
            .selection
            .slot(slot)
            .map(|f| f.file_name.clone())
    }

    pub fn select(&self, slot: ArtifactSlot, file: Option<ArtifactFile>) {
        self.shared.lock().selection.set(slot, file);
    }

    pub fn set_algorithm(&self, algorithm: EncryptionAlgorithm) {
        self.shared.lock().selection.algorithm = algorithm;
    }

    pub fn set_compress(&self, compress: bool) {
        self.shared.lock().selection.compress = compress;
    }

    /// Change the active operation. Always resets to `Idle` with no files selected.
    pub fn switch_kind(&self, kind: OperationKind) {
        self.shared.transition(|session| {
            session.kind = kind;
            session.reset();
            ((), Some(OperationStatus::Idle))
        })
    }

    /// Clear every selected file and force `Idle`, whatever the current state.
    ///
    /// A request still in flight is orphaned: its outcome is discarded and its
    /// `submit` call returns `SubmitError::Superseded`.
    pub fn reset(&self) {
        self.shared.transition(|session| {
            session.reset();
            ((), Some(OperationStatus::Idle))
        })
    }

    /// Algorithms offered to the user. Falls back to the full catalogue when
    /// the service cannot be asked or returns nothing usable.
    pub async fn supported_algorithms(&self) -> Vec<EncryptionAlgorithm> {
        match self.api.supported_algorithms().await {
            Ok(algorithms) if !algorithms.is_empty() => algorithms,
            Ok(_) => {
                log::warn!("Service listed no known algorithms; using built-in catalogue");
                EncryptionAlgorithm::ALL.to_vec()
            }
            Err(e) => {
                log::warn!("Algorithm discovery failed, using built-in catalogue: {}", e);
                EncryptionAlgorithm::ALL.to_vec()
            }
        }
    }

    /// Validate the current selection and run the active operation.
    ///
    /// Rejected without side effects if another operation is `Processing`.
    /// An incomplete selection moves straight to `Error` without any request.
    pub async fn submit(&self) -> Result<OperationResult, SubmitError> {
        let (operation_id, request, file_name) = self.shared.transition(|session| {
            if session.status.is_processing() {
                log::warn!("Rejected submission: an operation is already processing");
                return (Err(SubmitError::Busy), None);
            }

            let kind = session.kind;
            let bundle = match session.selection.bundle_for(kind) {
                Ok(bundle) => bundle,
                Err(missing) => {
                    let message = self.messages.missing_input(kind).to_string();
                    log::info!("Rejected {:?} submission, missing: {:?}", kind, missing);
                    let status = OperationStatus::Error {
                        kind,
                        message: message.clone(),
                    };
                    session.status = status.clone();
                    return (Err(SubmitError::Validation(message)), Some(status));
                }
            };

            let operation_id = uuid::Uuid::new_v4().simple().to_string();
            let processing = OperationStatus::Processing {
                kind,
                progress: ProgressFraction::ZERO,
                message: self.messages.processing(kind).to_string(),
            };
            session.active_operation = Some(operation_id.clone());
            session.status = processing.clone();
            let prepared = (
                operation_id,
                request_builder::build(&bundle),
                bundle.suggested_file_name(),
            );
            (Ok(prepared), Some(processing))
        })?;

        let kind = request.kind;
        log::info!(
            "Operation {} started: {:?}, {} bytes to upload",
            operation_id,
            kind,
            request.upload_size()
        );

        let sink: ProgressSink = {
            let shared = self.shared.clone();
            let operation_id = operation_id.clone();
            Arc::new(move |fraction: ProgressFraction| {
                shared.report_progress(&operation_id, fraction)
            })
        };

        match self.api.submit(request, sink).await {
            Ok(data) => {
                let status = OperationStatus::Success {
                    kind,
                    file_name: file_name.clone(),
                    message: self.messages.success(kind).to_string(),
                };
                if !self.shared.complete(&operation_id, status) {
                    log::info!("Discarding result of superseded operation {}", operation_id);
                    return Err(SubmitError::Superseded);
                }
                log::info!(
                    "Operation {} succeeded: {} bytes as '{}'",
                    operation_id,
                    data.len(),
                    file_name
                );
                Ok(OperationResult {
                    operation_id,
                    file_name,
                    data,
                })
            }
            Err(e) => {
                log::error!("Operation {} ({:?}) failed: {}", operation_id, kind, e);
                let message = self.messages.failure(kind).to_string();
                let status = OperationStatus::Error {
                    kind,
                    message: message.clone(),
                };
                if !self.shared.complete(&operation_id, status) {
                    return Err(SubmitError::Superseded);
                }
                Err(SubmitError::Failed(message))
            }
        }
    }
}
