//! Counted rendezvous for workers that want to be waited for.
//!
//! # Responsibilities
//! - Count outstanding registered workers
//! - Release every waiter when the count returns to zero
//! - Treat deregistering more than was registered as a fatal usage error

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::DrainTimeout;
use crate::observability::metrics;

/// Wait group shared by the entry point and registered workers.
#[derive(Debug, Clone)]
pub struct WaitGroup {
    count: Arc<watch::Sender<usize>>,
}

impl WaitGroup {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { count: Arc::new(tx) }
    }

    /// Register `n` workers. Call before starting the work.
    ///
    /// # Panics
    /// If the counter would overflow.
    pub fn add(&self, n: usize) {
        let mut overflow = false;
        self.count.send_if_modified(|count| match count.checked_add(n) {
            Some(next) => {
                *count = next;
                false
            }
            None => {
                overflow = true;
                false
            }
        });
        if overflow {
            panic!("WaitGroup::add overflowed the worker counter");
        }
        let outstanding = self.outstanding();
        metrics::set_outstanding_workers(outstanding);
        tracing::trace!(added = n, outstanding, "Workers registered");
    }

    /// Deregister one worker.
    ///
    /// # Panics
    /// If called more times than workers were added.
    pub fn done(&self) {
        let mut underflow = false;
        let mut remaining = 0;
        self.count.send_if_modified(|count| {
            if *count == 0 {
                underflow = true;
                return false;
            }
            *count -= 1;
            remaining = *count;
            remaining == 0
        });
        if underflow {
            panic!("WaitGroup::done called more times than add");
        }
        metrics::set_outstanding_workers(remaining);
        tracing::trace!(outstanding = remaining, "Worker finished");
    }

    /// Register one worker and get a guard that deregisters it on drop.
    pub fn register(&self) -> WorkerGuard {
        self.add(1);
        WorkerGuard { group: self.clone() }
    }

    /// Current number of outstanding workers.
    pub fn outstanding(&self) -> usize {
        *self.count.borrow()
    }

    /// Wait until no registered worker is outstanding.
    pub async fn wait(&self) {
        let mut rx = self.count.subscribe();
        let _ = rx.wait_for(|count| *count == 0).await;
    }

    /// Like [`wait`](Self::wait), but give up after `limit`.
    pub async fn wait_timeout(&self, limit: Duration) -> Result<(), DrainTimeout> {
        tokio::time::timeout(limit, self.wait())
            .await
            .map_err(|_| DrainTimeout {
                outstanding: self.outstanding(),
            })
    }
}

impl Default for WaitGroup {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration held by a worker. Deregisters on drop, including on panic
/// unwinding out of the worker.
#[derive(Debug)]
#[must_use = "dropping the guard deregisters the worker immediately"]
pub struct WorkerGuard {
    group: WaitGroup,
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        self.group.done();
    }
}
