//! Carousel timing configuration

use std::time::Duration;

/// Default auto-play interval
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(4500);

/// Default fade-in duration
pub const FADE_DURATION: Duration = Duration::from_millis(600);

/// Default pause after the fade before the next transition is accepted
pub const SETTLE_DELAY: Duration = Duration::from_millis(400);

/// Default time the "updated" badge stays visible
pub const BADGE_DURATION: Duration = Duration::from_millis(2000);

/// Carousel timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    /// Time between automatic advances
    pub autoplay_interval: Duration,
    /// Fade-in duration of a new slide
    pub fade_duration: Duration,
    /// Extra pause after the fade completes
    pub settle_delay: Duration,
    /// How long the "updated" badge is shown
    pub badge_duration: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: AUTOPLAY_INTERVAL,
            fade_duration: FADE_DURATION,
            settle_delay: SETTLE_DELAY,
            badge_duration: BADGE_DURATION,
        }
    }
}

impl CarouselConfig {
    /// Set the auto-play interval
    pub fn with_autoplay_interval(mut self, interval: Duration) -> Self {
        self.autoplay_interval = interval;
        self
    }

    /// Time from painting a slide until the carousel is idle again
    pub fn transition_hold(&self) -> Duration {
        self.fade_duration + self.settle_delay
    }
}
