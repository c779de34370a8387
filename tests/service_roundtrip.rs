//! End-to-end checks of the reqwest transport and orchestrator against a local
//! fake of the encryption service.

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use encrypter_client::{
    AppError, ArtifactFile, ArtifactSlot, ClientSettings, EncrypterApi, EncrypterApiV1, EncryptionAlgorithm,
    Locale, OperationKind, OperationStatus, Orchestrator, StatusListener, SubmitError,
};

#[derive(Debug, Clone, PartialEq)]
struct ReceivedField {
    name: String,
    file_name: Option<String>,
    data: Vec<u8>,
}

#[derive(Clone, Default)]
struct Received {
    fields: Arc<Mutex<Vec<ReceivedField>>>,
}

impl Received {
    fn names(&self) -> Vec<String> {
        self.fields
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.name.clone())
            .collect()
    }

    fn text(&self, name: &str) -> Option<String> {
        self.fields
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.name == name)
            .map(|f| String::from_utf8_lossy(&f.data).to_string())
    }
}

async fn drain(received: &Received, mut multipart: Multipart) -> Result<(), StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(|s| s.to_string());
        let data = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        received.fields.lock().unwrap().push(ReceivedField {
            name,
            file_name,
            data: data.to_vec(),
        });
    }
    Ok(())
}

async fn encrypt(
    State(received): State<Received>,
    multipart: Multipart,
) -> Result<Vec<u8>, StatusCode> {
    drain(&received, multipart).await?;
    Ok(b"PK-encrypted-archive".to_vec())
}

async fn decrypt(
    State(received): State<Received>,
    multipart: Multipart,
) -> Result<Vec<u8>, StatusCode> {
    drain(&received, multipart).await?;
    Ok(b"original plaintext".to_vec())
}

async fn reject(State(received): State<Received>, multipart: Multipart) -> StatusCode {
    let _ = drain(&received, multipart).await;
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn algorithms() -> Json<Vec<&'static str>> {
    Json(vec!["AES_GCM_256", "SERPENT", "CHACHA20"])
}

async fn spawn_service(decrypt_archive_fails: bool) -> (String, Received) {
    let received = Received::default();
    let archive_route = if decrypt_archive_fails {
        post(reject)
    } else {
        post(decrypt)
    };
    let router = Router::new()
        .route("/encrypter/api/enhancedFile/encrypt-enhanced", post(encrypt))
        .route("/encrypter/api/enhancedFile/decrypt-from-archive", archive_route)
        .route("/encrypter/api/enhancedFile/decrypt-enhanced", post(decrypt))
        .route("/encrypter/api/enhancedFile/algorithms", get(algorithms))
        .with_state(received.clone());
    (serve(router).await, received)
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/encrypter/api", addr)
}

fn orchestrator_for(base_url: String) -> Orchestrator<EncrypterApiV1> {
    encrypter_client::connect(ClientSettings {
        base_url,
        ..Default::default()
    })
    .unwrap()
}

#[derive(Default)]
struct RecordingListener {
    seen: Mutex<Vec<OperationStatus>>,
}

impl StatusListener for RecordingListener {
    fn on_status(&self, status: &OperationStatus) {
        self.seen.lock().unwrap().push(status.clone());
    }
}

#[tokio::test]
async fn encrypt_sends_contract_fields_and_returns_archive() {
    let (base_url, received) = spawn_service(false).await;
    let orchestrator = orchestrator_for(base_url);
    orchestrator.select(
        ArtifactSlot::Source,
        Some(ArtifactFile::new("report.pdf", b"%PDF-1.7 body".to_vec())),
    );
    orchestrator.set_algorithm(EncryptionAlgorithm::Aes256);
    orchestrator.set_compress(false);

    let result = orchestrator.submit().await.unwrap();
    assert_eq!(result.file_name, "report.pdf_encrypted.zip");
    assert_eq!(result.data.as_ref(), b"PK-encrypted-archive");

    assert_eq!(received.names(), vec!["file", "algorithm", "compress"]);
    assert_eq!(received.text("algorithm").as_deref(), Some("AES_256"));
    assert_eq!(received.text("compress").as_deref(), Some("false"));
    let fields = received.fields.lock().unwrap();
    assert_eq!(fields[0].file_name.as_deref(), Some("report.pdf"));
    assert_eq!(fields[0].data, b"%PDF-1.7 body".to_vec());
}

#[tokio::test]
async fn discrete_decrypt_sends_five_binary_fields() {
    let (base_url, received) = spawn_service(false).await;
    let orchestrator = orchestrator_for(base_url);
    orchestrator.switch_kind(OperationKind::DecryptFromDiscreteArtifacts);
    for (slot, name) in [
        (ArtifactSlot::EncryptedFile, "report.pdf.enc"),
        (ArtifactSlot::EncryptedKey, "key.enc"),
        (ArtifactSlot::PrivateKey, "private.pem"),
        (ArtifactSlot::Signature, "report.sig"),
        (ArtifactSlot::Metadata, "metadata.json"),
    ] {
        orchestrator.select(slot, Some(ArtifactFile::new(name, name.as_bytes().to_vec())));
    }

    let result = orchestrator.submit().await.unwrap();
    assert_eq!(result.file_name, "decrypted_file");
    assert_eq!(result.data.as_ref(), b"original plaintext");

    assert_eq!(
        received.names(),
        vec!["file", "encryptedKey", "privateKey", "signature", "metadata"]
    );
    assert!(received
        .fields
        .lock()
        .unwrap()
        .iter()
        .all(|f| f.file_name.is_some()));
}

#[tokio::test]
async fn server_error_becomes_error_status_without_payload() {
    let (base_url, _received) = spawn_service(true).await;
    let orchestrator = orchestrator_for(base_url);
    orchestrator.switch_kind(OperationKind::DecryptFromArchive);
    orchestrator.select(
        ArtifactSlot::Archive,
        Some(ArtifactFile::new("bundle.zip", vec![0x50, 0x4b, 3, 4])),
    );

    let err = orchestrator.submit().await.unwrap_err();
    assert!(matches!(err, SubmitError::Failed(_)));
    assert!(matches!(
        orchestrator.status(),
        OperationStatus::Error {
            kind: OperationKind::DecryptFromArchive,
            ..
        }
    ));
    assert_eq!(orchestrator.progress().value(), 0);
}

#[tokio::test]
async fn upload_progress_is_reported_and_non_decreasing() {
    let (base_url, _received) = spawn_service(false).await;
    let listener = Arc::new(RecordingListener::default());
    let api = EncrypterApiV1::new(ClientSettings {
        base_url,
        ..Default::default()
    })
    .unwrap();
    let orchestrator = Orchestrator::with_listener(api, Locale::English, listener.clone());
    orchestrator.select(
        ArtifactSlot::Source,
        Some(ArtifactFile::new("large.bin", vec![0xAB; 300_000])),
    );

    orchestrator.submit().await.unwrap();

    let seen = listener.seen.lock().unwrap();
    let values: Vec<u8> = seen.iter().map(|s| s.progress().value()).collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{:?}", values);
    assert!(seen
        .iter()
        .any(|s| s.is_processing() && s.progress().value() > 0));
    assert!(matches!(seen.last(), Some(OperationStatus::Success { .. })));
}

#[tokio::test]
async fn algorithm_discovery_skips_unknown_ids() {
    let (base_url, _received) = spawn_service(false).await;
    let api = EncrypterApiV1::new(ClientSettings {
        base_url,
        ..Default::default()
    })
    .unwrap();
    let algorithms = api.supported_algorithms().await.unwrap();
    assert_eq!(
        algorithms,
        vec![EncryptionAlgorithm::AesGcm256, EncryptionAlgorithm::ChaCha20]
    );
}

#[tokio::test]
async fn malformed_algorithm_list_is_api_error() {
    let router = Router::new().route(
        "/encrypter/api/enhancedFile/algorithms",
        get(|| async { "AES_256, CHACHA20" }),
    );
    let base_url = serve(router).await;
    let api = EncrypterApiV1::new(ClientSettings {
        base_url: base_url.clone(),
        ..Default::default()
    })
    .unwrap();
    match api.supported_algorithms().await.unwrap_err() {
        AppError::Api(msg) => assert!(msg.starts_with("Malformed response"), "got: {}", msg),
        other => panic!("Expected AppError::Api, got: {:?}", other),
    }

    let orchestrator = orchestrator_for(base_url);
    assert_eq!(
        orchestrator.supported_algorithms().await,
        EncryptionAlgorithm::ALL.to_vec()
    );
}
