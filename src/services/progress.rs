//! Upload progress tracking — counts bytes handed to the transport and
//! forwards a rounded percentage to a progress sink.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::api::ProgressSink;
use crate::models::status::ProgressFraction;

/// Byte counter for one request body.
///
/// Notifies the sink only when the rounded percentage increases, so observers
/// see a strictly increasing sequence within one request.
pub struct UploadProgress {
    total_bytes: u64,
    bytes_sent: AtomicU64,
    last_reported: Mutex<ProgressFraction>,
    sink: ProgressSink,
}

impl UploadProgress {
    pub fn new(total_bytes: u64, sink: ProgressSink) -> Self {
        Self {
            total_bytes,
            bytes_sent: AtomicU64::new(0),
            last_reported: Mutex::new(ProgressFraction::ZERO),
            sink,
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    #[cfg(test)]
    fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::Relaxed)
    }

    /// Account for `bytes` more bytes written to the request body.
    pub fn record(&self, bytes: u64) {
        let sent = self.bytes_sent.fetch_add(bytes, Ordering::AcqRel) + bytes;
        let fraction = ProgressFraction::from_bytes(sent, self.total_bytes);
        let mut last = self
            .last_reported
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if fraction > *last {
            *last = fraction;
            (self.sink)(fraction);
        }
    }
}
