//! BaCCUL Launch - countdown and notify-me relay for the coming-soon page
//!
//! This is the main entry point for the baccul-launch server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use baccul_launch::{
    api::create_router,
    config::Config,
    services::EmailJsClient,
    state::AppState,
    tasks::{CountdownClock, SystemTime},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("baccul_launch={},tower_http=info", config.log_level()))
        .init();

    info!("Starting baccul-launch server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, emailjs={}",
          config.host, config.port, config.emailjs_url);

    // Configure the notification collaborator before any send
    let notifier = EmailJsClient::new(
        config.emailjs_url.clone(),
        config.service_id.clone(),
        config.template_id.clone(),
    );
    match &config.public_key {
        Some(key) => notifier.init(key.clone())?,
        None => warn!("No EmailJS public key configured; notification requests will fail"),
    }

    // Create application state and start the launch countdown
    let countdown = CountdownClock::new(Arc::new(SystemTime));
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        countdown,
        Arc::new(notifier),
    ));
    state.countdown.start().map_err(anyhow::Error::msg)?;

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /countdown    - Time remaining until launch");
    info!("  GET  /services     - Service catalog");
    info!("  GET  /notify       - Notify-me form state");
    info!("  PUT  /notify/email - Edit the email input");
    info!("  POST /notify       - Submit a launch notification request");
    info!("  GET  /status       - Check current status");
    info!("  GET  /health       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to install signal handler: {}", e),
            }
        }
    }

    state.countdown.stop();
    info!("Server shutdown complete");
    Ok(())
}
