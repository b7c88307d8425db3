//! Polling [`DishSource`]
//!
//! Re-reads the whole list on a fixed period and reports a snapshot on the
//! first successful read and whenever the list changes.

use std::sync::Arc;
use std::time::Duration;

use dishboard_carousel::{DishSource, SourceCallback, SourceEvent, Subscription};
use shared::DishRecord;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::DishStore;

pub struct PollingSource {
    store: Arc<dyn DishStore>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl PollingSource {
    pub fn new(store: Arc<dyn DishStore>, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            store,
            interval,
            shutdown,
        }
    }
}

impl DishSource for PollingSource {
    fn subscribe(&self, on_change: SourceCallback) -> Subscription {
        let token = self.shutdown.child_token();
        let store = self.store.clone();
        let period = self.interval;
        let cancelled = token.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last: Option<Vec<DishRecord>> = None;

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {}
                }

                match store.list().await {
                    Ok(dishes) => {
                        if last.as_ref() != Some(&dishes) {
                            tracing::debug!(count = dishes.len(), "Dish list changed");
                            last = Some(dishes.clone());
                            on_change(SourceEvent::Snapshot(dishes));
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Dish list poll failed");
                        on_change(SourceEvent::Failed(e.to_string()));
                    }
                }
            }
            tracing::debug!("Dish list polling stopped");
        });

        Subscription::from_token(token)
    }
}
