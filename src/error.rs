//! Error types shared across the client.
//!
//! `AppError` is the internal, diagnostic error raised by the `api` and
//! `models` layers. `SubmitError` is what callers of the orchestrator see: it
//! carries only client-generated, user-facing messages.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Connection, DNS or body transfer failure.
    #[error("Network error: {0}")]
    Network(String),
    /// The service answered with a non-success status or an unreadable body.
    #[error("API error: {0}")]
    Api(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AppError::Api(format!("status={} {}", status.as_u16(), err)),
            None if err.is_decode() => AppError::Api(err.to_string()),
            None if err.is_builder() => AppError::Internal(err.to_string()),
            None => AppError::Network(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(format!("Malformed response: {}", err))
    }
}

/// Outcome of a rejected or failed submission, as surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The artifact bundle was incomplete; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// The exchange with the service failed.
    #[error("{0}")]
    Failed(String),
    #[error("An operation is already processing")]
    Busy,
    /// A reset happened while the request was in flight; its result was dropped.
    #[error("Operation was superseded by a reset")]
    Superseded,
}
