//! dishboard-cloud — restaurant dish signage service
//!
//! Long-running service that:
//! - Lets staff add dishes (photo → Cloudinary, metadata → Firestore)
//! - Runs the slide carousel over the Firestore dish list
//! - Streams slides to display screens over WebSocket

mod api;
mod config;
mod display;
mod error;
mod logger;
mod media;
mod state;
mod store;

use config::Config;
use state::AppState;
use tokio_util::sync::CancellationToken;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    let _log_guard = logger::init_logger(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        store = config.firestore_ready(),
        uploads = config.cloudinary_enabled(),
        "Starting dishboard-cloud"
    );

    let shutdown = CancellationToken::new();

    // Initialize application state and feed the carousel
    let state = AppState::new(&config, shutdown.clone())?;
    let _subscription = state.attach_source(&config, shutdown.clone());

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("dishboard-cloud HTTP listening on {http_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("dishboard-cloud stopped");
    Ok(())
}

/// Resolve on Ctrl-C, stopping the carousel and polling first
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
