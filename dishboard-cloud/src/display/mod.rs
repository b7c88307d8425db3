//! DisplayHub — slide fan-out to connected displays
//!
//! ```text
//! CarouselWorker
//!       │ Surface calls (paint, fade_in, badge, fullscreen)
//!       ▼
//! DisplayHub
//!   ├── frame: latest slide/badge/fullscreen (replayed as Ready)
//!   └── broadcast: Sender<DisplayMessage>
//!         │
//!         ▼
//!   Display WS handler (one per screen)
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dishboard_carousel::{CarouselError, CarouselResult, FULLSCREEN_LABEL, Surface};
use parking_lot::RwLock;
use shared::{DisplayMessage, SlideFrame};
use tokio::sync::broadcast;

/// Broadcast channel capacity — enough to absorb a burst on connect
const BROADCAST_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
struct Frame {
    slide: Option<SlideFrame>,
    visible: bool,
    badge: bool,
    fullscreen: bool,
    fullscreen_label: String,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            slide: None,
            visible: false,
            badge: false,
            fullscreen: false,
            fullscreen_label: FULLSCREEN_LABEL.to_string(),
        }
    }
}

impl Frame {
    fn ready(&self) -> DisplayMessage {
        DisplayMessage::Ready {
            slide: self.slide.clone(),
            visible: self.visible,
            badge: self.badge,
            fullscreen: self.fullscreen,
            fullscreen_label: self.fullscreen_label.clone(),
        }
    }
}

struct HubInner {
    frame: RwLock<Frame>,
    tx: broadcast::Sender<DisplayMessage>,
    connections: AtomicUsize,
}

/// Carousel [`Surface`] shared by every display connection
#[derive(Clone)]
pub struct DisplayHub {
    inner: Arc<HubInner>,
}

impl Default for DisplayHub {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            inner: Arc::new(HubInner {
                frame: RwLock::new(Frame::default()),
                tx,
                connections: AtomicUsize::new(0),
            }),
        }
    }

    /// Register a display. The receiver starts right after the returned
    /// `Ready`, so nothing is missed or repeated.
    pub fn connect(&self) -> (DisplayConnection, broadcast::Receiver<DisplayMessage>, DisplayMessage) {
        let (rx, ready) = self.resubscribe();
        let count = self.inner.connections.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(connections = count, "Display connected");
        (
            DisplayConnection {
                inner: self.inner.clone(),
            },
            rx,
            ready,
        )
    }

    /// Fresh receiver plus the frame it starts from (used after lag)
    pub fn resubscribe(&self) -> (broadcast::Receiver<DisplayMessage>, DisplayMessage) {
        let frame = self.inner.frame.read();
        (self.inner.tx.subscribe(), frame.ready())
    }

    /// Current frame as a `Ready` message
    pub fn ready(&self) -> DisplayMessage {
        self.inner.frame.read().ready()
    }

    pub fn connections(&self) -> usize {
        self.inner.connections.load(Ordering::SeqCst)
    }

    /// Apply `update` to the cached frame and broadcast `message` under the
    /// same lock, keeping cache and stream in order.
    fn publish(&self, message: DisplayMessage, update: impl FnOnce(&mut Frame)) {
        let mut frame = self.inner.frame.write();
        update(&mut frame);
        // No receivers is fine
        let _ = self.inner.tx.send(message);
    }
}

/// Live display registration; unregisters on drop
pub struct DisplayConnection {
    inner: Arc<HubInner>,
}

impl Drop for DisplayConnection {
    fn drop(&mut self) {
        let count = self.inner.connections.fetch_sub(1, Ordering::SeqCst) - 1;
        tracing::info!(connections = count, "Display disconnected");
    }
}

#[async_trait]
impl Surface for DisplayHub {
    fn paint(&self, slide: &SlideFrame) {
        self.publish(
            DisplayMessage::Slide {
                slide: slide.clone(),
            },
            |frame| {
                frame.slide = Some(slide.clone());
                frame.visible = false;
            },
        );
    }

    fn fade_in(&self) {
        self.publish(DisplayMessage::FadeIn, |frame| frame.visible = true);
    }

    fn clear(&self) {
        self.publish(DisplayMessage::Clear, |frame| {
            frame.slide = None;
            frame.visible = false;
        });
    }

    fn set_badge(&self, visible: bool) {
        self.publish(DisplayMessage::Badge { visible }, |frame| {
            frame.badge = visible
        });
    }

    fn is_fullscreen(&self) -> bool {
        self.inner.frame.read().fullscreen
    }

    async fn request_fullscreen(&self) -> CarouselResult<()> {
        if self.connections() == 0 {
            return Err(CarouselError::Fullscreen("no display connected".into()));
        }
        self.inner.frame.write().fullscreen = true;
        Ok(())
    }

    async fn exit_fullscreen(&self) -> CarouselResult<()> {
        self.inner.frame.write().fullscreen = false;
        Ok(())
    }

    fn set_fullscreen_label(&self, label: &str) {
        let mut frame = self.inner.frame.write();
        frame.fullscreen_label = label.to_string();
        let _ = self.inner.tx.send(DisplayMessage::Fullscreen {
            active: frame.fullscreen,
            label: label.to_string(),
        });
    }
}
