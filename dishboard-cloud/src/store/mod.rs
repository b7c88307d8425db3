//! Dish store
//!
//! [`DishStore`] is the persistence seam: the admin API writes through it and
//! [`PollingSource`] reads the list for the carousel.

mod firestore;
#[cfg(test)]
pub mod memory;
mod poller;

pub use firestore::FirestoreStore;
pub use poller::PollingSource;

use async_trait::async_trait;
use shared::{DishCreate, DishRecord};
use thiserror::Error;

/// Dish store failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed store response: {0}")]
    Decode(String),
}

/// Remote dish collection
#[async_trait]
pub trait DishStore: Send + Sync + 'static {
    /// All dishes, newest first
    async fn list(&self) -> Result<Vec<DishRecord>, StoreError>;

    /// Insert a dish; the store stamps `createdAt`. Returns the new id.
    async fn create(&self, dish: DishCreate) -> Result<String, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
