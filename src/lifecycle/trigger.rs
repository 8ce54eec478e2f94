//! Trigger intake and dispatch.
//!
//! # Data Flow
//! ```text
//! signal thread ─┐
//!                ├─ try_send ─▶ [intake, capacity 1] ─▶ Dispatcher ─▶ ShutdownEvent::fire
//! manual calls ──┘
//! ```
//!
//! # Design Decisions
//! - Sends never block and are lossy: one pending request is all that is
//!   ever needed, extras carry no information
//! - The dispatcher reads exactly one request and exits; later sends find
//!   the intake closed and are dropped

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::lifecycle::event::{ShutdownEvent, ShutdownReason};
use crate::observability::metrics;

/// Sending half of the intake queue.
#[derive(Debug, Clone)]
pub(crate) struct Trigger {
    tx: mpsc::Sender<ShutdownReason>,
}

impl Trigger {
    /// Non-blocking enqueue. Returns `true` if the request was buffered.
    pub(crate) fn send(&self, reason: ShutdownReason) -> bool {
        match self.tx.try_send(reason) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                tracing::debug!(reason = %dropped, "Shutdown request already pending, dropping");
                false
            }
            Err(TrySendError::Closed(dropped)) => {
                tracing::debug!(reason = %dropped, "Shutdown already dispatched, dropping");
                false
            }
        }
    }
}

/// Background consumer of the intake queue. Sole writer of the event.
pub(crate) struct Dispatcher {
    rx: mpsc::Receiver<ShutdownReason>,
    event: ShutdownEvent,
}

/// Create a linked intake queue and dispatcher for `event`.
pub(crate) fn channel(event: ShutdownEvent) -> (Trigger, Dispatcher) {
    let (tx, rx) = mpsc::channel(1);
    (Trigger { tx }, Dispatcher { rx, event })
}

impl Dispatcher {
    /// Wait for the first request and fire the event with it.
    ///
    /// Returns without firing if every trigger handle is dropped first.
    pub(crate) async fn run(mut self) {
        let Some(reason) = self.rx.recv().await else {
            tracing::trace!("All triggers dropped before shutdown was requested");
            return;
        };
        if self.event.fire(reason) {
            tracing::info!(reason = %reason, "Broadcasting shutdown");
            metrics::record_trigger(&reason);
            metrics::record_initiated();
        }
        self.rx.close();
    }
}
