use serde::{Deserialize, Serialize};

/// Deployment default for the encryption service.
pub const DEFAULT_BASE_URL: &str = "https://encryptermylo.onrender.com/encrypter/api";
/// Environment variable that overrides the service base address.
pub const BASE_URL_ENV: &str = "ENCRYPTER_API_BASE_URL";
const DEFAULT_USER_AGENT: &str = concat!("EncrypterClient/", env!("CARGO_PKG_VERSION"));

/// Language used for user-facing status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Locale {
    #[default]
    English,
    Spanish,
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSettings {
    /// Service base address; endpoint paths are appended to it.
    pub base_url: String,
    pub locale: Locale,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: Locale::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientSettings {
    /// Defaults, with the base address taken from `ENCRYPTER_API_BASE_URL` when set.
    pub fn from_env() -> Self {
        Self::default().with_base_url_override(std::env::var(BASE_URL_ENV).ok())
    }

    fn with_base_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Join the base address and an endpoint path with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
