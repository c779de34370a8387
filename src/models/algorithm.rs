//! Cipher configurations offered by the encryption service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identifier passed through to the service in the `algorithm` form field.
///
/// The client attaches no cryptographic meaning to these values; it only
/// guarantees that whatever it sends is one of the known identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EncryptionAlgorithm {
    #[serde(rename = "AES_128")]
    Aes128,
    #[default]
    #[serde(rename = "AES_256")]
    Aes256,
    #[serde(rename = "AES_GCM_128")]
    AesGcm128,
    #[serde(rename = "AES_GCM_256")]
    AesGcm256,
    #[serde(rename = "CHACHA20")]
    ChaCha20,
}

impl EncryptionAlgorithm {
    pub const ALL: [EncryptionAlgorithm; 5] = [
        EncryptionAlgorithm::Aes128,
        EncryptionAlgorithm::Aes256,
        EncryptionAlgorithm::AesGcm128,
        EncryptionAlgorithm::AesGcm256,
        EncryptionAlgorithm::ChaCha20,
    ];

    /// Wire identifier sent to the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes128 => "AES_128",
            EncryptionAlgorithm::Aes256 => "AES_256",
            EncryptionAlgorithm::AesGcm128 => "AES_GCM_128",
            EncryptionAlgorithm::AesGcm256 => "AES_GCM_256",
            EncryptionAlgorithm::ChaCha20 => "CHACHA20",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes128 => "AES 128",
            EncryptionAlgorithm::Aes256 => "AES 256",
            EncryptionAlgorithm::AesGcm128 => "AES-GCM 128",
            EncryptionAlgorithm::AesGcm256 => "AES-GCM 256",
            EncryptionAlgorithm::ChaCha20 => "ChaCha20",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes128 => "AES cipher with a 128-bit key",
            EncryptionAlgorithm::Aes256 => "AES cipher with a 256-bit key",
            EncryptionAlgorithm::AesGcm128 => "AES in GCM mode with a 128-bit key",
            EncryptionAlgorithm::AesGcm256 => "AES in GCM mode with a 256-bit key",
            EncryptionAlgorithm::ChaCha20 => "ChaCha20 stream cipher, fast in software",
        }
    }
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncryptionAlgorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown encryption algorithm: {}", s)))
    }
}

/// Keep the identifiers the client knows about, in the order the service
/// listed them. Unknown identifiers are logged and skipped.
pub fn parse_supported(ids: &[String]) -> Vec<EncryptionAlgorithm> {
    let mut algorithms = Vec::with_capacity(ids.len());
    for id in ids {
        match id.parse::<EncryptionAlgorithm>() {
            Ok(alg) if !algorithms.contains(&alg) => algorithms.push(alg),
            Ok(_) => {}
            Err(_) => log::warn!("Ignoring unsupported algorithm id from service: {}", id),
        }
    }
    algorithms
}
