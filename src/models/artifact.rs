//! Artifact inputs for the three service operations.

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::algorithm::EncryptionAlgorithm;

/// Suggested name for any decrypted output; the service does not echo the original name.
pub const DECRYPTED_FILE_NAME: &str = "decrypted_file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Encrypt,
    DecryptFromArchive,
    DecryptFromDiscreteArtifacts,
}

impl OperationKind {
    /// Artifact slots that must be populated before this operation can be submitted.
    pub fn required_slots(&self) -> &'static [ArtifactSlot] {
        match self {
            OperationKind::Encrypt => &[ArtifactSlot::Source],
            OperationKind::DecryptFromArchive => &[ArtifactSlot::Archive],
            OperationKind::DecryptFromDiscreteArtifacts => &[
                ArtifactSlot::EncryptedFile,
                ArtifactSlot::EncryptedKey,
                ArtifactSlot::PrivateKey,
                ArtifactSlot::Signature,
                ArtifactSlot::Metadata,
            ],
        }
    }
}

/// A named binary input selected by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    pub file_name: String,
    pub data: Bytes,
}

impl ArtifactFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, keeping its file name for the multipart part.
    ///
    /// Uses spawn_blocking to avoid blocking the tokio runtime.
    pub async fn load(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let path = path.as_ref().to_path_buf();
        tokio::task::spawn_blocking(move || {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| AppError::Io(format!("Not a file path: {}", path.display())))?;
            let data = std::fs::read(&path)?;
            Ok::<_, AppError>(Self::new(file_name, data))
        })
        .await
        .map_err(|e| AppError::Internal(format!("spawn_blocking join error: {}", e)))?
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Input fields a caller can populate on the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactSlot {
    Source,
    Archive,
    EncryptedFile,
    EncryptedKey,
    PrivateKey,
    Signature,
    Metadata,
}

/// A fully-populated input set for one operation.
///
/// Every file is mandatory for its variant, so an incomplete bundle cannot be
/// constructed. `ArtifactSelection::bundle_for` is the only fallible path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactBundle {
    Encrypt {
        source: ArtifactFile,
        algorithm: EncryptionAlgorithm,
        compress: bool,
    },
    DecryptFromArchive {
        archive: ArtifactFile,
    },
    DecryptFromDiscreteArtifacts {
        encrypted_file: ArtifactFile,
        encrypted_key: ArtifactFile,
        private_key: ArtifactFile,
        signature: ArtifactFile,
        metadata: ArtifactFile,
    },
}

impl ArtifactBundle {
    pub fn kind(&self) -> OperationKind {
        match self {
            ArtifactBundle::Encrypt { .. } => OperationKind::Encrypt,
            ArtifactBundle::DecryptFromArchive { .. } => OperationKind::DecryptFromArchive,
            ArtifactBundle::DecryptFromDiscreteArtifacts { .. } => {
                OperationKind::DecryptFromDiscreteArtifacts
            }
        }
    }

    /// File name offered to the caller when saving the service result.
    pub fn suggested_file_name(&self) -> String {
        match self {
            ArtifactBundle::Encrypt { source, .. } => format!("{}_encrypted.zip", source.file_name),
            _ => DECRYPTED_FILE_NAME.to_string(),
        }
    }
}

/// Mutable per-operation selection, populated field by field before submission.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSelection {
    pub source: Option<ArtifactFile>,
    pub archive: Option<ArtifactFile>,
    pub encrypted_file: Option<ArtifactFile>,
    pub encrypted_key: Option<ArtifactFile>,
    pub private_key: Option<ArtifactFile>,
    pub signature: Option<ArtifactFile>,
    pub metadata: Option<ArtifactFile>,
    pub algorithm: EncryptionAlgorithm,
    pub compress: bool,
}

impl ArtifactSelection {
    pub fn slot(&self, slot: ArtifactSlot) -> Option<&ArtifactFile> {
        match slot {
            ArtifactSlot::Source => self.source.as_ref(),
            ArtifactSlot::Archive => self.archive.as_ref(),
            ArtifactSlot::EncryptedFile => self.encrypted_file.as_ref(),
            ArtifactSlot::EncryptedKey => self.encrypted_key.as_ref(),
            ArtifactSlot::PrivateKey => self.private_key.as_ref(),
            ArtifactSlot::Signature => self.signature.as_ref(),
            ArtifactSlot::Metadata => self.metadata.as_ref(),
        }
    }

    pub fn set(&mut self, slot: ArtifactSlot, file: Option<ArtifactFile>) {
        let target = match slot {
            ArtifactSlot::Source => &mut self.source,
            ArtifactSlot::Archive => &mut self.archive,
            ArtifactSlot::EncryptedFile => &mut self.encrypted_file,
            ArtifactSlot::EncryptedKey => &mut self.encrypted_key,
            ArtifactSlot::PrivateKey => &mut self.private_key,
            ArtifactSlot::Signature => &mut self.signature,
            ArtifactSlot::Metadata => &mut self.metadata,
        };
        *target = file;
    }

    /// Drop every selected file. Algorithm and compression preferences survive.
    pub fn clear_files(&mut self) {
        let algorithm = self.algorithm;
        let compress = self.compress;
        *self = Self {
            algorithm,
            compress,
            ..Self::default()
        };
    }

    pub fn missing_for(&self, kind: OperationKind) -> Vec<ArtifactSlot> {
        kind.required_slots()
            .iter()
            .copied()
            .filter(|slot| self.slot(*slot).is_none())
            .collect()
    }

    /// Assemble the bundle for `kind`, or report which slots are still empty.
    pub fn bundle_for(&self, kind: OperationKind) -> Result<ArtifactBundle, Vec<ArtifactSlot>> {
        let missing = self.missing_for(kind);
        if !missing.is_empty() {
            return Err(missing);
        }
        let take = |slot: ArtifactSlot| self.slot(slot).cloned().ok_or_else(|| vec![slot]);
        let bundle = match kind {
            OperationKind::Encrypt => ArtifactBundle::Encrypt {
                source: take(ArtifactSlot::Source)?,
                algorithm: self.algorithm,
                compress: self.compress,
            },
            OperationKind::DecryptFromArchive => ArtifactBundle::DecryptFromArchive {
                archive: take(ArtifactSlot::Archive)?,
            },
            OperationKind::DecryptFromDiscreteArtifacts => {
                ArtifactBundle::DecryptFromDiscreteArtifacts {
                    encrypted_file: take(ArtifactSlot::EncryptedFile)?,
                    encrypted_key: take(ArtifactSlot::EncryptedKey)?,
                    private_key: take(ArtifactSlot::PrivateKey)?,
                    signature: take(ArtifactSlot::Signature)?,
                    metadata: take(ArtifactSlot::Metadata)?,
                }
            }
        };
        Ok(bundle)
    }
}
