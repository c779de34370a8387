//! EncrypterApiV1 — reqwest implementation of the EncrypterApi trait.
//!
//! Binary fields are streamed in fixed-size slices so upload progress can be
//! reported while the body is being written.

use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};

use super::{EncrypterApi, FieldValue, ProgressSink, ServiceRequest, ALGORITHMS_PATH};
use crate::error::AppError;
use crate::models::algorithm::{self, EncryptionAlgorithm};
use crate::models::artifact::ArtifactFile;
use crate::models::settings::ClientSettings;
use crate::services::chunk_manager::{self, UPLOAD_CHUNK_SIZE};
use crate::services::progress::UploadProgress;

pub struct EncrypterApiV1 {
    client: reqwest::Client,
    settings: ClientSettings,
}

impl EncrypterApiV1 {
    /// Build a client for the configured service. No request timeout is set;
    /// the HTTP stack's defaults apply.
    pub fn new(settings: ClientSettings) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Wrap an artifact in a streaming part that reports each slice to `progress`.
    pub(crate) fn tracked_part(
        file: &ArtifactFile,
        progress: &Arc<UploadProgress>,
    ) -> crate::error::Result<Part> {
        let chunks = chunk_manager::plan_chunks(&file.data, UPLOAD_CHUNK_SIZE);
        let progress = progress.clone();
        let stream = futures::stream::iter(chunks).map(move |chunk: Bytes| {
            progress.record(chunk.len() as u64);
            Ok::<Bytes, std::io::Error>(chunk)
        });
        Part::stream_with_length(reqwest::Body::wrap_stream(stream), file.len())
            .file_name(file.file_name.clone())
            .mime_str("application/octet-stream")
            .map_err(|e| AppError::Internal(format!("MIME parse error: {}", e)))
    }

    pub(crate) fn build_form(
        request: &ServiceRequest,
        progress: &Arc<UploadProgress>,
    ) -> crate::error::Result<Form> {
        let mut form = Form::new();
        for field in &request.fields {
            form = match &field.value {
                FieldValue::Text(value) => form.text(field.name, value.clone()),
                FieldValue::File(file) => form.part(field.name, Self::tracked_part(file, progress)?),
            };
        }
        Ok(form)
    }
}

impl EncrypterApi for EncrypterApiV1 {
    async fn submit(
        &self,
        request: ServiceRequest,
        on_progress: ProgressSink,
    ) -> crate::error::Result<Bytes> {
        let progress = Arc::new(UploadProgress::new(request.upload_size(), on_progress));
        let form = Self::build_form(&request, &progress)?;
        let url = self.settings.endpoint(request.path);

        log::debug!(
            "POST {} fields={:?} upload_bytes={}",
            url,
            request.field_names(),
            progress.total_bytes()
        );

        let body = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(body)
    }

    async fn supported_algorithms(&self) -> crate::error::Result<Vec<EncryptionAlgorithm>> {
        let body = self
            .client
            .get(self.settings.endpoint(ALGORITHMS_PATH))
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let ids: Vec<String> = serde_json::from_slice(&body)?;
        Ok(algorithm::parse_supported(&ids))
    }
}
