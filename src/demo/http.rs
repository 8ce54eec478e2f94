//! HTTP server whose graceful shutdown is driven by the coordinator.

use std::time::Duration;

use axum::{routing::get, Router};
use shutdown_coordinator::Shutdown;
use tokio::net::TcpListener;

async fn hello() -> &'static str {
    "hello"
}

pub async fn run(shutdown: &Shutdown, bind: &str, grace: Duration) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    tracing::info!(address = %listener.local_addr()?, "HTTP server listening");

    let app = Router::new().route("/", get(hello));
    let server_shutdown = shutdown.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { server_shutdown.wait().await })
            .await
    });

    tokio::select! {
        _ = shutdown.wait() => {}
        result = &mut server => {
            if shutdown.initiated() {
                tracing::info!("HTTP server gracefully shut down");
                return Ok(());
            }
            match result {
                Ok(Ok(())) => tracing::warn!("HTTP server stopped on its own"),
                Ok(Err(e)) => tracing::error!(error = %e, "Abnormal HTTP server shutdown"),
                Err(e) => tracing::error!(error = %e, "HTTP server task failed"),
            }
            // Not a normal exit; take the rest of the process down with it.
            tracing::warn!("Initiating manual system shutdown");
            shutdown.initiate_manual();
            return Ok(());
        }
    }

    tracing::info!("Stopping HTTP server (system shutdown)");
    match tokio::time::timeout(grace, &mut server).await {
        Ok(Ok(Ok(()))) => tracing::info!("HTTP server gracefully shut down"),
        Ok(Ok(Err(e))) => tracing::warn!(error = %e, "HTTP server shutdown error"),
        Ok(Err(e)) => tracing::error!(error = %e, "HTTP server task failed"),
        Err(_) => {
            tracing::warn!(grace_secs = grace.as_secs(), "Graceful shutdown timed out, closing connections");
            server.abort();
        }
    }
    Ok(())
}
