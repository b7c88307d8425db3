//! Image dimension probing for the carousel

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use dishboard_carousel::{CarouselError, CarouselResult, ImageInfo, ImageLoader};

use super::MAX_FILE_SIZE;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches images over HTTP and reads their dimensions from the header
#[derive(Debug, Clone)]
pub struct HttpImageLoader {
    http: reqwest::Client,
}

impl HttpImageLoader {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, url: &str) -> CarouselResult<ImageInfo> {
        if url.trim().is_empty() {
            return Err(CarouselError::ImageFetch("empty image URL".into()));
        }

        let mut response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CarouselError::ImageFetch(e.to_string()))?;

        // Stop reading as soon as the header is in
        let mut probe = HeaderProbe::new(MAX_FILE_SIZE);
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| CarouselError::ImageFetch(e.to_string()))?
        {
            if let Some(info) = probe.push(&chunk)? {
                return Ok(info);
            }
        }
        probe.finish()
    }
}

/// Accumulates a body prefix until its dimensions can be read
struct HeaderProbe {
    buffer: Vec<u8>,
    limit: usize,
}

impl HeaderProbe {
    fn new(limit: usize) -> Self {
        Self {
            buffer: Vec::new(),
            limit,
        }
    }

    /// Add a chunk; `Some` once the header is complete
    fn push(&mut self, chunk: &[u8]) -> CarouselResult<Option<ImageInfo>> {
        self.buffer.extend_from_slice(chunk);
        if let Ok(info) = probe_dimensions(&self.buffer) {
            return Ok(Some(info));
        }
        if self.buffer.len() > self.limit {
            return Err(CarouselError::ImageFetch(format!(
                "no image header within {} bytes",
                self.limit
            )));
        }
        Ok(None)
    }

    /// Body ended; report why the header never parsed
    fn finish(self) -> CarouselResult<ImageInfo> {
        probe_dimensions(&self.buffer)
    }
}

/// Read width and height without decoding the bitmap
fn probe_dimensions(bytes: &[u8]) -> CarouselResult<ImageInfo> {
    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CarouselError::ImageDecode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| CarouselError::ImageDecode(e.to_string()))?;
    Ok(ImageInfo::new(width, height))
}
