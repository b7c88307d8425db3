//! In-memory [`DishStore`] for tests

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use shared::{DishCreate, DishRecord};

use super::{DishStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    dishes: Mutex<Vec<DishRecord>>,
    next_id: AtomicU32,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn with_dishes(dishes: Vec<DishRecord>) -> Self {
        let store = Self::default();
        *store.dishes.lock() = dishes;
        store
    }

    /// Make every call fail until reset
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn dishes(&self) -> Vec<DishRecord> {
        self.dishes.lock().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 503,
                message: "unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DishStore for MemoryStore {
    async fn list(&self) -> Result<Vec<DishRecord>, StoreError> {
        self.check()?;
        let mut dishes = self.dishes();
        dishes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(dishes)
    }

    async fn create(&self, dish: DishCreate) -> Result<String, StoreError> {
        self.check()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = format!("mem-{n}");
        self.dishes.lock().push(DishRecord {
            id: id.clone(),
            name: dish.name,
            image_url: dish.image_url,
            category: dish.category,
            created_at: DateTime::<Utc>::UNIX_EPOCH + Duration::minutes(n as i64),
        });
        Ok(id)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check()?;
        self.dishes.lock().retain(|d| d.id != id);
        Ok(())
    }
}
