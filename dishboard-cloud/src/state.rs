//! Application state for dishboard-cloud

use std::sync::Arc;

use dishboard_carousel::{CarouselHandle, StaticSource, Subscription, sample_dishes};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::display::DisplayHub;
use crate::media::{CloudinaryClient, HttpImageLoader, ImageHost};
use crate::store::{DishStore, FirestoreStore, PollingSource};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// None when Firestore credentials are missing
    pub store: Option<Arc<dyn DishStore>>,
    /// None when Cloudinary credentials are missing
    pub images: Option<Arc<dyn ImageHost>>,
    pub carousel: CarouselHandle,
    pub display: DisplayHub,
}

impl AppState {
    /// Build clients from config and start the carousel worker
    pub fn new(config: &Config, shutdown: CancellationToken) -> Result<Self, BoxError> {
        let store: Option<Arc<dyn DishStore>> = if config.firestore_ready() {
            Some(Arc::new(FirestoreStore::new(
                &config.firebase_project_id,
                &config.firebase_api_key,
                &config.dish_collection,
            )?))
        } else {
            tracing::warn!("Firestore not configured, display will show sample dishes");
            None
        };

        let images: Option<Arc<dyn ImageHost>> = if config.cloudinary_enabled() {
            Some(Arc::new(CloudinaryClient::new(
                &config.cloudinary_cloud_name,
                &config.cloudinary_upload_preset,
            )?))
        } else {
            tracing::warn!("Cloudinary not configured, dish uploads are disabled");
            None
        };

        let display = DisplayHub::new();
        let carousel = CarouselHandle::spawn(
            config.carousel(),
            Arc::new(display.clone()),
            Arc::new(HttpImageLoader::new()?),
            shutdown,
        );

        Ok(Self {
            store,
            images,
            carousel,
            display,
        })
    }

    /// Feed the carousel from the store, or from the sample dishes when
    /// there is no store
    pub fn attach_source(&self, config: &Config, shutdown: CancellationToken) -> Subscription {
        match &self.store {
            Some(store) => self.carousel.attach(&PollingSource::new(
                store.clone(),
                config.store_poll_interval,
                shutdown,
            )),
            None => self.carousel.attach(&StaticSource::new(sample_dishes())),
        }
    }
}
