//! Request builder — turns a validated `ArtifactBundle` into a multipart
//! `ServiceRequest` with the service's fixed field names.

use crate::api::{endpoint_path, FieldValue, FormField, ServiceRequest};
use crate::models::artifact::{ArtifactBundle, ArtifactFile};

fn file_field(name: &'static str, file: &ArtifactFile) -> FormField {
    FormField {
        name,
        value: FieldValue::File(file.clone()),
    }
}

fn text_field(name: &'static str, value: impl Into<String>) -> FormField {
    FormField {
        name,
        value: FieldValue::Text(value.into()),
    }
}

/// Build the request for `bundle`. Field order follows the service contract.
pub fn build(bundle: &ArtifactBundle) -> ServiceRequest {
    let fields = match bundle {
        ArtifactBundle::Encrypt {
            source,
            algorithm,
            compress,
        } => vec![
            file_field("file", source),
            text_field("algorithm", algorithm.as_str()),
            text_field("compress", compress.to_string()),
        ],
        ArtifactBundle::DecryptFromArchive { archive } => vec![file_field("archive", archive)],
        ArtifactBundle::DecryptFromDiscreteArtifacts {
            encrypted_file,
            encrypted_key,
            private_key,
            signature,
            metadata,
        } => vec![
            file_field("file", encrypted_file),
            file_field("encryptedKey", encrypted_key),
            file_field("privateKey", private_key),
            file_field("signature", signature),
            file_field("metadata", metadata),
        ],
    };

    let kind = bundle.kind();
    ServiceRequest {
        kind,
        path: endpoint_path(kind),
        fields,
    }
}
