//! Worker loop guarded by `initiated()` issuing context-aware queries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use shutdown_coordinator::{DrainTimeout, Shutdown, ShutdownContext, ShutdownInitiated};
use thiserror::Error;

const QUERY_DURATION: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
enum QueryError {
    #[error("query aborted: {0}")]
    Aborted(#[from] ShutdownInitiated),
}

/// Stand-in for a database adapter whose calls honor a cancellation scope.
#[derive(Default)]
struct MockDb {
    count: AtomicU64,
}

impl MockDb {
    async fn run_query(&self, ctx: &ShutdownContext, query: &str) -> Result<String, QueryError> {
        tracing::debug!(query, "Running query");
        ctx.run(tokio::time::sleep(QUERY_DURATION)).await?;
        let count = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(format!("count: {}", count))
    }
}

pub async fn run(shutdown: &Shutdown, grace: Duration) -> Result<(), DrainTimeout> {
    let guard = shutdown.workers().register();
    let worker = shutdown.clone();
    tokio::spawn(async move {
        let _guard = guard;
        let ctx = worker.context();
        let db = MockDb::default();
        while !worker.initiated() {
            match db.run_query(&ctx, "some-query").await {
                Ok(result) => tracing::info!(%result, "Query result"),
                Err(e) => tracing::warn!(error = %e, "Query error"),
            }
        }
    });

    shutdown.wait().await;
    shutdown.workers().wait_timeout(grace).await
}
