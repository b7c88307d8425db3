//! Data models
//!
//! Shared between the carousel, the cloud service and display clients.
//! Field names serialize in camelCase to match the stored documents.

pub mod dish;

// Re-exports
pub use dish::*;
