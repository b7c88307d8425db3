//! Image probing for slide layout

use async_trait::async_trait;
use shared::SlideLayout;

use crate::error::CarouselResult;

/// Dimensions of a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_dimensions(self.width, self.height)
    }
}

/// Image orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Square images count as landscape
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if height > width {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }

    /// Layout used to show an image of this orientation
    pub fn layout(self) -> SlideLayout {
        match self {
            Self::Landscape => SlideLayout::FullBleed,
            Self::Portrait => SlideLayout::Letterboxed,
        }
    }
}

/// Loads an image far enough to know its dimensions
#[async_trait]
pub trait ImageLoader: Send + Sync + 'static {
    async fn load(&self, url: &str) -> CarouselResult<ImageInfo>;
}
