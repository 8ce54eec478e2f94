//! Unregistered background loop; the entry point does the cleanup.

use std::time::Duration;

use shutdown_coordinator::Shutdown;

pub async fn run(shutdown: &Shutdown) {
    tokio::spawn(async {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        loop {
            ticker.tick().await;
            tracing::info!("Tick...");
        }
    });

    shutdown.wait().await;
    tracing::info!("Doing this before shutting down");
}
