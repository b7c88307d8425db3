//! API routes for dishboard-cloud

pub mod dishes;
pub mod display;
pub mod health;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::media::MAX_FILE_SIZE;
use crate::state::AppState;

/// Room for multipart framing and text fields around the file
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Admin (dish management)
    let admin = Router::new()
        .route("/api/dishes", get(dishes::list_dishes).post(dishes::create_dish))
        .route("/api/dishes/{id}", delete(dishes::delete_dish))
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + MULTIPART_OVERHEAD));

    // Display (carousel screens)
    let display = Router::new()
        .route("/display/ws", get(display::handle_display_ws))
        .route("/api/display/state", get(display::carousel_state))
        .route("/api/display/next", post(display::next_slide))
        .route("/api/display/prev", post(display::prev_slide))
        .route("/api/display/fullscreen", post(display::toggle_fullscreen));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(admin)
        .merge(display)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
