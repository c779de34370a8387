//! Chunk planning for request bodies.
//!
//! Splits an artifact into fixed-size slices that are streamed to the
//! transport one at a time, giving the progress tracker a byte count per slice.
//! Pure computation; slices share the original buffer.

use bytes::Bytes;

/// Upload slice size: 64 KiB.
pub const UPLOAD_CHUNK_SIZE: usize = 65_536;

/// Split `data` into consecutive slices of at most `chunk_size` bytes.
///
/// An empty buffer yields no slices. A zero `chunk_size` is treated as one
/// slice covering the whole buffer.
pub fn plan_chunks(data: &Bytes, chunk_size: usize) -> Vec<Bytes> {
    if data.is_empty() {
        return Vec::new();
    }
    if chunk_size == 0 {
        return vec![data.clone()];
    }

    let mut chunks = Vec::with_capacity(data.len().div_ceil(chunk_size));
    let mut offset = 0;
    while offset < data.len() {
        let end = std::cmp::min(offset + chunk_size, data.len());
        chunks.push(data.slice(offset..end));
        offset = end;
    }
    chunks
}
