//! Business logic layer.
//!
//! The orchestrator owns the operation status machine and drives requests
//! through the `api` layer. The request builder, chunk planner, progress
//! tracker and message catalogue support it.

pub mod chunk_manager;
pub mod messages;
pub mod orchestrator;
pub mod progress;
pub mod request_builder;
