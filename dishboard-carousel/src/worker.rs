//! Carousel worker
//!
//! Owns one [`CarouselState`] on a single tokio task. Every input, including
//! timer fires and image-load completions, arrives as a [`Command`] on the
//! worker's channel, so state transitions are strictly serialized.
//! [`CarouselHandle`] is the cloneable front door.

use std::sync::Arc;
use std::time::Duration;

use shared::DishRecord;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::CarouselConfig;
use crate::error::{CarouselError, CarouselResult};
use crate::loader::{ImageInfo, ImageLoader};
use crate::sample::sample_dishes;
use crate::source::{DishSource, SourceEvent, Subscription};
use crate::state::{CarouselSnapshot, CarouselState, Effect};
use crate::surface::{EXIT_FULLSCREEN_LABEL, FULLSCREEN_LABEL, Surface};

/// Worker input
#[derive(Debug)]
pub(crate) enum Command {
    /// New full dish list from the store
    ReplaceList(Vec<DishRecord>),
    /// Store reported an error
    StoreFailed(String),
    Next,
    Prev,
    ToggleFullscreen,
    Snapshot(oneshot::Sender<CarouselSnapshot>),

    // Internal completions
    Tick {
        generation: u64,
    },
    ImageLoaded {
        ticket: u64,
        result: CarouselResult<ImageInfo>,
    },
    Settled {
        ticket: u64,
    },
    BadgeExpired {
        generation: u64,
    },
    /// Fullscreen request finished, carrying the new button label
    FullscreenChanged {
        result: CarouselResult<&'static str>,
    },
}

/// Carousel worker
///
/// Created with [`CarouselWorker::new`], driven by [`CarouselWorker::run`].
pub struct CarouselWorker {
    state: CarouselState,
    config: CarouselConfig,
    surface: Arc<dyn Surface>,
    loader: Arc<dyn ImageLoader>,
    /// Loopback sender for timers and loads
    tx: mpsc::UnboundedSender<Command>,
    rx: mpsc::UnboundedReceiver<Command>,
    autoplay_task: Option<JoinHandle<()>>,
    /// A fullscreen request is awaiting the surface
    fullscreen_pending: bool,
    shutdown: CancellationToken,
}

impl CarouselWorker {
    /// Build a worker falling back to the built-in sample dishes
    pub fn new(
        config: CarouselConfig,
        surface: Arc<dyn Surface>,
        loader: Arc<dyn ImageLoader>,
        shutdown: CancellationToken,
    ) -> (Self, CarouselHandle) {
        Self::with_fallback(config, surface, loader, sample_dishes(), shutdown)
    }

    pub fn with_fallback(
        config: CarouselConfig,
        surface: Arc<dyn Surface>,
        loader: Arc<dyn ImageLoader>,
        fallback: Vec<DishRecord>,
        shutdown: CancellationToken,
    ) -> (Self, CarouselHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = Self {
            state: CarouselState::new(fallback),
            config,
            surface,
            loader,
            tx: tx.clone(),
            rx,
            autoplay_task: None,
            fullscreen_pending: false,
            shutdown,
        };
        (worker, CarouselHandle { tx })
    }

    /// Run until shutdown is signalled
    pub async fn run(mut self) {
        tracing::info!(
            interval_ms = self.config.autoplay_interval.as_millis() as u64,
            "Carousel worker started"
        );

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Carousel worker received shutdown signal");
                    break;
                }
                command = self.rx.recv() => {
                    // Unreachable while self.tx is alive, kept for clarity
                    let Some(command) = command else { break };
                    self.handle(command);
                }
            }
        }

        self.stop_autoplay();
    }

    fn handle(&mut self, command: Command) {
        let effects = match command {
            Command::ReplaceList(dishes) => {
                tracing::info!(count = dishes.len(), "Dish list updated");
                self.state.replace_list(dishes)
            }
            Command::StoreFailed(reason) => {
                tracing::warn!(error = %reason, has_data = !self.state.dishes().is_empty(), "Dish store error");
                self.state.store_failed()
            }
            Command::Next => self.state.next(),
            Command::Prev => self.state.prev(),
            Command::ToggleFullscreen => {
                self.toggle_fullscreen();
                Vec::new()
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.state.snapshot());
                Vec::new()
            }
            Command::Tick { generation } => self.state.tick(generation),
            Command::ImageLoaded { ticket, result } => {
                let info = match result {
                    Ok(info) => Some(info),
                    Err(e) => {
                        tracing::warn!(ticket, error = %e, "Slide image unavailable, showing placeholder");
                        None
                    }
                };
                self.state.image_loaded(ticket, info)
            }
            Command::Settled { ticket } => self.state.settled(ticket),
            Command::BadgeExpired { generation } => self.state.badge_expired(generation),
            Command::FullscreenChanged { result } => {
                self.fullscreen_pending = false;
                match result {
                    Ok(label) => self.surface.set_fullscreen_label(label),
                    Err(e) => tracing::warn!(error = %e, "Fullscreen not supported"),
                }
                Vec::new()
            }
        };

        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::LoadImage { ticket, dish } => {
                tracing::debug!(ticket, dish_id = %dish.id, "Loading slide image");
                let loader = self.loader.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = loader.load(&dish.image_url).await;
                    let _ = tx.send(Command::ImageLoaded { ticket, result });
                });
            }
            Effect::Paint(slide) => {
                tracing::debug!(dish_id = %slide.dish_id, layout = ?slide.layout, "Painting slide");
                self.surface.paint(&slide);
            }
            Effect::FadeIn => self.surface.fade_in(),
            Effect::ScheduleSettle { ticket } => {
                self.schedule(self.config.transition_hold(), Command::Settled { ticket });
            }
            Effect::Clear => self.surface.clear(),
            Effect::StartAutoplay { generation } => self.start_autoplay(generation),
            Effect::StopAutoplay => self.stop_autoplay(),
            Effect::ShowBadge { generation } => {
                self.surface.set_badge(true);
                self.schedule(
                    self.config.badge_duration,
                    Command::BadgeExpired { generation },
                );
            }
            Effect::HideBadge => self.surface.set_badge(false),
        }
    }

    /// Deliver `command` back to this worker after `delay`
    fn schedule(&self, delay: Duration, command: Command) {
        let tx = self.tx.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(command);
                }
            }
        });
    }

    fn start_autoplay(&mut self, generation: u64) {
        self.stop_autoplay();

        let period = self.config.autoplay_interval;
        let tx = self.tx.clone();
        self.autoplay_task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Command::Tick { generation }).is_err() {
                    break;
                }
            }
        }));
        tracing::debug!(generation, "Auto-play started");
    }

    fn stop_autoplay(&mut self) {
        if let Some(task) = self.autoplay_task.take() {
            task.abort();
            tracing::debug!("Auto-play stopped");
        }
    }

    /// One request at a time; toggles arriving meanwhile are dropped
    fn toggle_fullscreen(&mut self) {
        if self.fullscreen_pending {
            tracing::debug!("Fullscreen change in progress, toggle dropped");
            return;
        }
        self.fullscreen_pending = true;

        let surface = self.surface.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = if surface.is_fullscreen() {
                surface.exit_fullscreen().await.map(|_| FULLSCREEN_LABEL)
            } else {
                surface.request_fullscreen().await.map(|_| EXIT_FULLSCREEN_LABEL)
            };
            let _ = tx.send(Command::FullscreenChanged { result });
        });
    }
}

/// Cloneable handle to a running carousel
#[derive(Debug, Clone)]
pub struct CarouselHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl CarouselHandle {
    /// Build a worker and run it on the current runtime
    pub fn spawn(
        config: CarouselConfig,
        surface: Arc<dyn Surface>,
        loader: Arc<dyn ImageLoader>,
        shutdown: CancellationToken,
    ) -> Self {
        let (worker, handle) = CarouselWorker::new(config, surface, loader, shutdown);
        tokio::spawn(worker.run());
        handle
    }

    /// Forward every event of `source` to this carousel
    pub fn attach(&self, source: &dyn DishSource) -> Subscription {
        let tx = self.tx.clone();
        source.subscribe(Arc::new(move |event| {
            let command = match event {
                SourceEvent::Snapshot(dishes) => Command::ReplaceList(dishes),
                SourceEvent::Failed(reason) => Command::StoreFailed(reason),
            };
            if tx.send(command).is_err() {
                tracing::debug!("Carousel stopped, dropping source event");
            }
        }))
    }

    pub fn replace_list(&self, dishes: Vec<DishRecord>) -> CarouselResult<()> {
        self.send(Command::ReplaceList(dishes))
    }

    pub fn store_failed(&self, reason: impl Into<String>) -> CarouselResult<()> {
        self.send(Command::StoreFailed(reason.into()))
    }

    pub fn next(&self) -> CarouselResult<()> {
        self.send(Command::Next)
    }

    pub fn prev(&self) -> CarouselResult<()> {
        self.send(Command::Prev)
    }

    pub fn toggle_fullscreen(&self) -> CarouselResult<()> {
        self.send(Command::ToggleFullscreen)
    }

    pub async fn snapshot(&self) -> CarouselResult<CarouselSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply))?;
        rx.await.map_err(|_| CarouselError::Stopped)
    }

    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }

    fn send(&self, command: Command) -> CarouselResult<()> {
        self.tx.send(command).map_err(|_| CarouselError::Stopped)
    }
}
