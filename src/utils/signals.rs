//! Signal handling for graceful shutdown

use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::info;

/// Wait for the first SIGTERM or SIGINT
pub async fn shutdown_signal() -> std::io::Result<()> {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])?;
    let handle = signals.handle();

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }

    handle.close();
    Ok(())
}
