//! # dishboard-carousel
//!
//! Slide-show controller for the dish display.
//!
//! ## Scope
//!
//! This crate handles WHAT the display shows and WHEN:
//! - Ordered dish list, current index and auto-play timer
//! - One slide transition at a time (`Idle → Loading → Settling → Idle`)
//! - Orientation-aware layout and placeholder slides for broken images
//! - Resynchronization when the dish list changes
//!
//! Talking to the outside world stays behind traits:
//! - Dish list updates → [`DishSource`]
//! - Image dimension probing → [`ImageLoader`]
//! - Painting and fullscreen → [`Surface`]
//!
//! ## Example
//!
//! ```ignore
//! use dishboard_carousel::{CarouselConfig, CarouselHandle, StaticSource, sample_dishes};
//!
//! let carousel = CarouselHandle::spawn(CarouselConfig::default(), surface, loader, shutdown);
//! let _subscription = carousel.attach(&StaticSource::new(sample_dishes()));
//! carousel.next()?;
//! ```

mod config;
mod error;
mod loader;
mod sample;
mod source;
mod state;
mod surface;
mod worker;

// Re-exports
pub use config::CarouselConfig;
pub use error::{CarouselError, CarouselResult};
pub use loader::{ImageInfo, ImageLoader, Orientation};
pub use sample::sample_dishes;
pub use source::{DishSource, SourceCallback, SourceEvent, StaticSource, Subscription};
pub use state::{CarouselSnapshot, CarouselState, Effect, Phase, PhaseKind};
pub use surface::{EXIT_FULLSCREEN_LABEL, FULLSCREEN_LABEL, Surface};
pub use worker::{CarouselHandle, CarouselWorker};
