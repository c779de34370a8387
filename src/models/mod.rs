//! Data models shared across the client.
//!
//! Algorithm identifiers, artifact inputs and bundles, the operation status
//! machine and client settings.

pub mod algorithm;
pub mod artifact;
pub mod settings;
pub mod status;
