//! Display API — carousel screens and remote control
//!
//! GET  /display/ws              — WebSocket slide stream
//! GET  /api/display/state       — carousel snapshot
//! POST /api/display/next|prev   — manual navigation
//! POST /api/display/fullscreen  — toggle fullscreen
//!
//! Protocol:
//! - Cloud → Display: DisplayMessage (Ready, Slide, FadeIn, Clear, Badge, Fullscreen)
//! - Display → Cloud: DisplayCommand (Next, Prev, ToggleFullscreen)

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use dishboard_carousel::{CarouselHandle, CarouselResult, CarouselSnapshot};
use futures::{Sink, SinkExt, Stream, StreamExt};
use shared::error::ApiResponse;
use shared::{DisplayCommand, DisplayMessage};
use tokio::sync::broadcast;
use tokio::time::Duration;

use crate::error::ServiceResult;
use crate::state::AppState;

const PING_INTERVAL: Duration = Duration::from_secs(30);

/// GET /display/ws
pub async fn handle_display_ws(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| display_ws_session(socket, state))
}

async fn display_ws_session(socket: WebSocket, state: AppState) {
    let (sink, stream) = socket.split();
    run_display_session(sink, stream, &state).await;
}

/// Serve one display: `Ready` first, then hub updates out and commands in,
/// until either side closes.
async fn run_display_session<S, R>(mut sink: S, mut stream: R, state: &AppState)
where
    S: Sink<Message> + Unpin,
    R: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    // Unregisters on drop
    let (_connection, mut hub_rx, ready) = state.display.connect();
    if send_message(&mut sink, &ready).await.is_err() {
        return;
    }

    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    ping_interval.tick().await; // skip immediate

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            event = hub_rx.recv() => {
                match event {
                    Ok(msg) => {
                        if send_message(&mut sink, &msg).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "Display lagged, resending current frame");
                        let (rx, ready) = state.display.resubscribe();
                        hub_rx = rx;
                        if send_message(&mut sink, &ready).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<DisplayCommand>(&text) {
                            Ok(cmd) => {
                                if let Err(e) = dispatch(&state.carousel, cmd) {
                                    tracing::warn!(error = %e, "Display command dropped");
                                    break;
                                }
                            }
                            Err(e) => tracing::debug!(error = %e, "Ignoring display frame"),
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }
}

fn dispatch(carousel: &CarouselHandle, cmd: DisplayCommand) -> CarouselResult<()> {
    tracing::debug!(command = ?cmd, "Display command");
    match cmd {
        DisplayCommand::Next => carousel.next(),
        DisplayCommand::Prev => carousel.prev(),
        DisplayCommand::ToggleFullscreen => carousel.toggle_fullscreen(),
    }
}

async fn send_message<S>(sink: &mut S, msg: &DisplayMessage) -> Result<(), ()>
where
    S: Sink<Message> + Unpin,
{
    let json = serde_json::to_string(msg).map_err(|_| ())?;
    sink.send(Message::Text(json.into())).await.map_err(|_| ())
}

/// GET /api/display/state
pub async fn carousel_state(
    State(state): State<AppState>,
) -> ServiceResult<ApiResponse<CarouselSnapshot>> {
    Ok(ApiResponse::success(state.carousel.snapshot().await?))
}

/// POST /api/display/next
pub async fn next_slide(State(state): State<AppState>) -> ServiceResult<ApiResponse<()>> {
    dispatch(&state.carousel, DisplayCommand::Next)?;
    Ok(ApiResponse::ok())
}

/// POST /api/display/prev
pub async fn prev_slide(State(state): State<AppState>) -> ServiceResult<ApiResponse<()>> {
    dispatch(&state.carousel, DisplayCommand::Prev)?;
    Ok(ApiResponse::ok())
}

/// POST /api/display/fullscreen
pub async fn toggle_fullscreen(State(state): State<AppState>) -> ServiceResult<ApiResponse<()>> {
    dispatch(&state.carousel, DisplayCommand::ToggleFullscreen)?;
    Ok(ApiResponse::ok())
}
