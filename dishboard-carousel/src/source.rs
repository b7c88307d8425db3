//! Dish list subscription interface

use shared::DishRecord;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Notification delivered by a [`DishSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    /// Full replacement list
    Snapshot(Vec<DishRecord>),
    /// The source could not deliver data
    Failed(String),
}

/// Change callback handed to [`DishSource::subscribe`]
pub type SourceCallback = Arc<dyn Fn(SourceEvent) + Send + Sync>;

/// Something that pushes full dish-list snapshots
pub trait DishSource {
    /// Start delivering events to `on_change` until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    fn subscribe(&self, on_change: SourceCallback) -> Subscription;
}

/// Handle that stops a subscription when dropped
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Subscription with nothing to stop
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Cancel `token` on unsubscribe
    pub fn from_token(token: CancellationToken) -> Self {
        Self::new(move || token.cancel())
    }

    pub fn unsubscribe(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Source with a fixed list, delivered once on subscribe
#[derive(Debug, Clone)]
pub struct StaticSource {
    dishes: Vec<DishRecord>,
}

impl StaticSource {
    pub fn new(dishes: Vec<DishRecord>) -> Self {
        Self { dishes }
    }
}

impl DishSource for StaticSource {
    fn subscribe(&self, on_change: SourceCallback) -> Subscription {
        on_change(SourceEvent::Snapshot(self.dishes.clone()));
        Subscription::noop()
    }
}
