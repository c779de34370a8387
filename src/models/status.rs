//! Operation status model exposed to the presentation layer.

use bytes::Bytes;
use serde::Serialize;

use crate::models::artifact::OperationKind;

/// Upload completion as an integer percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct ProgressFraction(u8);

impl ProgressFraction {
    pub const ZERO: ProgressFraction = ProgressFraction(0);
    pub const COMPLETE: ProgressFraction = ProgressFraction(100);

    /// Clamp an arbitrary percentage into range.
    pub fn new(percent: u32) -> Self {
        Self(percent.min(100) as u8)
    }

    /// `round(sent * 100 / total)`, clamped. A zero total reports no progress.
    pub fn from_bytes(sent: u64, total: u64) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let scaled = (sent as u128 * 100 + total as u128 / 2) / total as u128;
        Self(scaled.min(100) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// State machine owned by the orchestrator.
///
/// Progress only exists while `Processing`; terminal states imply 100 or 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum OperationStatus {
    Idle,
    #[serde(rename_all = "camelCase")]
    Processing {
        kind: OperationKind,
        progress: ProgressFraction,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Success {
        kind: OperationKind,
        file_name: String,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Error { kind: OperationKind, message: String },
}

impl OperationStatus {
    pub fn progress(&self) -> ProgressFraction {
        match self {
            OperationStatus::Processing { progress, .. } => *progress,
            OperationStatus::Success { .. } => ProgressFraction::COMPLETE,
            OperationStatus::Idle | OperationStatus::Error { .. } => ProgressFraction::ZERO,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            OperationStatus::Idle => "",
            OperationStatus::Processing { message, .. }
            | OperationStatus::Success { message, .. }
            | OperationStatus::Error { message, .. } => message,
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, OperationStatus::Processing { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperationStatus::Success { .. } | OperationStatus::Error { .. }
        )
    }
}

/// Binary produced by the service, handed to the caller exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub operation_id: String,
    pub file_name: String,
    pub data: Bytes,
}
