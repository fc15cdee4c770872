//! Process signals that stop the server

use log::{info, warn};
use std::future::Future;

use crate::error::Result;

/// Future that resolves on Ctrl+C (and SIGTERM on Unix).
///
/// Handlers are installed when this function is called, not when the future
/// is first polled, so a signal arriving during startup is still caught.
#[cfg(unix)]
pub fn shutdown_signal() -> Result<impl Future<Output = ()> + Send + 'static> {
    use crate::error::ServeError;
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())
        .map_err(|e| ServeError::SignalError(format!("SIGINT: {}", e)))?;
    let mut terminate = signal(SignalKind::terminate())
        .map_err(|e| ServeError::SignalError(format!("SIGTERM: {}", e)))?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => info!("Received interrupt signal"),
            _ = terminate.recv() => info!("Received terminate signal"),
        }
        announce_stop();

        // The handlers stay installed, so a second signal has to end the
        // process itself instead of waiting for the drain.
        tokio::spawn(async move {
            tokio::select! {
                _ = interrupt.recv() => {}
                _ = terminate.recv() => {}
            }
            warn!("Second signal received, exiting without draining connections");
            std::process::exit(0);
        });
    })
}

#[cfg(not(unix))]
pub fn shutdown_signal() -> Result<impl Future<Output = ()> + Send + 'static> {
    Ok(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received interrupt signal");
        announce_stop();

        tokio::spawn(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Second signal received, exiting without draining connections");
                std::process::exit(0);
            }
        });
    })
}

fn announce_stop() {
    println!("\nStopping server...");
}
