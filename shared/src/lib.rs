//! Shared types for Dishboard
//!
//! Common types used by the carousel library and the cloud service:
//! dish models, the display wire protocol and the unified error system.

pub mod display;
pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use display::{DisplayCommand, DisplayMessage, SlideFrame, SlideLayout};
pub use models::{DishCreate, DishRecord};
