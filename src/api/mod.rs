//! Encryption service API abstraction layer.
//!
//! `EncrypterApi` is the only interface through which the client talks to the
//! remote service. Upper layers (`services/`) build a `ServiceRequest` and hand
//! it to an implementation of this trait; they never construct HTTP requests
//! themselves. `EncrypterApiV1` is the reqwest-backed implementation.

use std::sync::Arc;

use bytes::Bytes;

use crate::error::AppError;
use crate::models::algorithm::EncryptionAlgorithm;
use crate::models::artifact::{ArtifactFile, OperationKind};
use crate::models::status::ProgressFraction;

pub const ENCRYPT_PATH: &str = "/enhancedFile/encrypt-enhanced";
pub const DECRYPT_ARCHIVE_PATH: &str = "/enhancedFile/decrypt-from-archive";
pub const DECRYPT_DISCRETE_PATH: &str = "/enhancedFile/decrypt-enhanced";
pub const ALGORITHMS_PATH: &str = "/enhancedFile/algorithms";

/// Service path that accepts the given operation.
pub fn endpoint_path(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Encrypt => ENCRYPT_PATH,
        OperationKind::DecryptFromArchive => DECRYPT_ARCHIVE_PATH,
        OperationKind::DecryptFromDiscreteArtifacts => DECRYPT_DISCRETE_PATH,
    }
}

/// Receives upload progress. May be called zero or more times per request.
pub type ProgressSink = Arc<dyn Fn(ProgressFraction) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(ArtifactFile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub value: FieldValue,
}

/// A transport-ready multipart request: endpoint path plus ordered form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub kind: OperationKind,
    pub path: &'static str,
    pub fields: Vec<FormField>,
}

impl ServiceRequest {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Total binary bytes to upload; progress is measured against this.
    pub fn upload_size(&self) -> u64 {
        self.fields
            .iter()
            .map(|f| match &f.value {
                FieldValue::File(file) => file.len(),
                FieldValue::Text(_) => 0,
            })
            .sum()
    }
}

/// Abstraction trait for encryption service interactions.
pub trait EncrypterApi: Send + Sync {
    /// POST a multipart request and return the raw response body.
    ///
    /// Exactly one attempt is made. Any network failure, non-success status or
    /// unreadable body is an error; nothing is retried.
    fn submit(
        &self,
        request: ServiceRequest,
        on_progress: ProgressSink,
    ) -> impl std::future::Future<Output = std::result::Result<Bytes, AppError>> + Send;

    /// Fetch the algorithm identifiers the service currently accepts.
    fn supported_algorithms(
        &self,
    ) -> impl std::future::Future<Output = std::result::Result<Vec<EncryptionAlgorithm>, AppError>>
           + Send;
}

pub mod v1;
