//! One-shot shutdown event.
//!
//! # States
//! - Pending: no termination request has been dispatched yet
//! - Fired: shutdown has begun (terminal, never reset)
//!
//! # Design Decisions
//! - Readiness is a `watch` channel so every current and future waiter sees
//!   the same transition, including waiters that arrive after it happened
//! - The reason is recorded before anything else is published, so any view
//!   that reports "fired" can also report why

use std::fmt;
use std::sync::{Arc, OnceLock};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::lifecycle::context::ShutdownContext;
use crate::lifecycle::signals::TerminationSignal;

/// Why shutdown was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// An OS termination request was intercepted.
    Signal(TerminationSignal),
    /// Application code called `initiate_manual`.
    Manual,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Signal(signal) => write!(f, "{} signal received", signal),
            ShutdownReason::Manual => write!(f, "manual trigger"),
        }
    }
}

struct Inner {
    reason: OnceLock<ShutdownReason>,
    token: CancellationToken,
    fired: watch::Sender<bool>,
}

/// Broadcast event that fires at most once per coordinator.
///
/// Cloning is cheap; every clone observes the same state.
#[derive(Clone)]
pub struct ShutdownEvent {
    inner: Arc<Inner>,
}

impl ShutdownEvent {
    /// Create a pending event.
    pub fn new() -> Self {
        let (fired, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                reason: OnceLock::new(),
                token: CancellationToken::new(),
                fired,
            }),
        }
    }

    /// Fire the event. Returns `true` only for the call that performed the
    /// transition; later and concurrent calls are absorbed.
    pub(crate) fn fire(&self, reason: ShutdownReason) -> bool {
        if self.inner.reason.set(reason).is_err() {
            return false;
        }
        self.inner.token.cancel();
        self.inner.fired.send_replace(true);
        true
    }

    /// Non-blocking poll of the readiness flag.
    pub fn is_fired(&self) -> bool {
        *self.inner.fired.borrow()
    }

    /// The reason recorded by the firing call, if any.
    pub fn reason(&self) -> Option<ShutdownReason> {
        if self.is_fired() {
            self.inner.reason.get().copied()
        } else {
            None
        }
    }

    /// Wait until the event fires. Completes immediately if it already has.
    ///
    /// Safe to use as a `tokio::select!` branch; dropping the future before
    /// completion has no effect on the event.
    pub async fn wait(&self) {
        let mut rx = self.inner.fired.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|fired| *fired).await;
    }

    /// Cancellation-token view of this event.
    pub fn context(&self) -> ShutdownContext {
        ShutdownContext::new(self.clone())
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.inner.token
    }

    /// Reason as seen through the token; set whenever the token is cancelled.
    pub(crate) fn recorded_reason(&self) -> Option<ShutdownReason> {
        self.inner.reason.get().copied()
    }
}

impl Default for ShutdownEvent {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ShutdownEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownEvent")
            .field("fired", &self.is_fired())
            .field("reason", &self.recorded_reason())
            .finish()
    }
}
