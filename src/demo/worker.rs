//! Registered worker that checks for shutdown between tasks.

use std::time::Duration;

use shutdown_coordinator::{DrainTimeout, Shutdown};

const TASK_DURATION: Duration = Duration::from_secs(1);
const SAVE_DURATION: Duration = Duration::from_secs(1);

pub async fn run(shutdown: &Shutdown, grace: Duration) -> Result<(), DrainTimeout> {
    let guard = shutdown.workers().register();
    let worker = shutdown.clone();
    tokio::spawn(async move {
        let _guard = guard;
        let mut task = 0u64;
        loop {
            tracing::info!(task, "[worker] Doing task");
            tokio::time::sleep(TASK_DURATION).await;

            if worker.initiated() {
                tracing::info!("[worker] Aborting; first saving progress");
                tokio::time::sleep(SAVE_DURATION).await;
                tracing::info!("[worker] Save complete");
                return;
            }
            task += 1;
        }
    });

    shutdown.wait().await;
    shutdown.workers().wait_timeout(grace).await
}
