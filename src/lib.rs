//! Client for a remote hybrid file encryption service.
//!
//! The service does all cryptographic work. This crate validates artifact
//! selections, builds the multipart requests, reports upload progress and
//! exposes a bounded status machine (idle, processing, success, error) to a
//! presentation layer.

pub mod api;
pub mod error;
pub mod models;
pub mod services;

pub use api::v1::EncrypterApiV1;
pub use api::EncrypterApi;
pub use error::{AppError, SubmitError};
pub use models::algorithm::EncryptionAlgorithm;
pub use models::artifact::{ArtifactBundle, ArtifactFile, ArtifactSlot, OperationKind};
pub use models::settings::{ClientSettings, Locale};
pub use models::status::{OperationResult, OperationStatus, ProgressFraction};
pub use services::orchestrator::{Orchestrator, StatusListener};

/// Orchestrator wired to the HTTP transport described by `settings`.
pub fn connect(settings: ClientSettings) -> error::Result<Orchestrator<EncrypterApiV1>> {
    let locale = settings.locale;
    let api = EncrypterApiV1::new(settings)?;
    Ok(Orchestrator::new(api, locale))
}
