//! Rendering target for the carousel

use async_trait::async_trait;
use shared::SlideFrame;

use crate::error::CarouselResult;

/// Toggle label while windowed
pub const FULLSCREEN_LABEL: &str = "Fullscreen";

/// Toggle label while fullscreen
pub const EXIT_FULLSCREEN_LABEL: &str = "Exit Fullscreen";

/// Where slides are painted
///
/// Painting never fails from the carousel's point of view; only the
/// fullscreen requests can be refused.
#[async_trait]
pub trait Surface: Send + Sync + 'static {
    /// Replace the current slide; the new slide starts transparent
    fn paint(&self, slide: &SlideFrame);

    /// Fade the current slide to full opacity
    fn fade_in(&self);

    /// Remove any slide
    fn clear(&self);

    /// Show or hide the "updated" indicator
    fn set_badge(&self, visible: bool);

    fn is_fullscreen(&self) -> bool;

    async fn request_fullscreen(&self) -> CarouselResult<()>;

    async fn exit_fullscreen(&self) -> CarouselResult<()>;

    fn set_fullscreen_label(&self, label: &str);
}
