//! Cancellation-scope view of the shutdown event.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::ShutdownInitiated;
use crate::lifecycle::event::{ShutdownEvent, ShutdownReason};

/// A cancellation scope whose "done" state is the shutdown event's fired
/// state, plus the reason as an error value.
#[derive(Debug, Clone)]
pub struct ShutdownContext {
    event: ShutdownEvent,
}

impl ShutdownContext {
    pub(crate) fn new(event: ShutdownEvent) -> Self {
        Self { event }
    }

    /// Whether shutdown has begun.
    pub fn is_done(&self) -> bool {
        self.event.token().is_cancelled()
    }

    /// Wait for shutdown to begin.
    pub async fn done(&self) {
        self.event.token().cancelled().await;
    }

    /// `Some` once shutdown has begun, describing why.
    pub fn err(&self) -> Option<ShutdownInitiated> {
        if !self.is_done() {
            return None;
        }
        self.event
            .recorded_reason()
            .map(|reason| ShutdownInitiated { reason })
    }

    /// The termination reason, if shutdown has begun.
    pub fn reason(&self) -> Option<ShutdownReason> {
        self.err().map(|e| e.reason)
    }

    /// A child token for libraries that take a `CancellationToken`.
    ///
    /// Cancelling the child does not initiate shutdown.
    pub fn token(&self) -> CancellationToken {
        self.event.token().child_token()
    }

    /// Drive `fut` until it completes or shutdown begins, whichever is first.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, ShutdownInitiated>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.done() => Err(self
                .err()
                .expect("reason is recorded before the token is cancelled")),
            out = fut => Ok(out),
        }
    }
}
