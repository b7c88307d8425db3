//! Error types for the carousel library

use thiserror::Error;

/// Carousel error types
#[derive(Debug, Error)]
pub enum CarouselError {
    /// Image could not be fetched
    #[error("Image fetch failed: {0}")]
    ImageFetch(String),

    /// Image bytes could not be decoded
    #[error("Image decode failed: {0}")]
    ImageDecode(String),

    /// Fullscreen request was denied or is unsupported
    #[error("Fullscreen unavailable: {0}")]
    Fullscreen(String),

    /// Carousel worker is no longer running
    #[error("Carousel stopped")]
    Stopped,
}

/// Result type for carousel operations
pub type CarouselResult<T> = Result<T, CarouselError>;
