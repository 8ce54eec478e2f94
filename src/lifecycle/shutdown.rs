//! Shutdown coordination for the process.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::SignalConfig;
use crate::error::ShutdownError;
use crate::lifecycle::completion::WaitGroup;
use crate::lifecycle::context::ShutdownContext;
use crate::lifecycle::event::{ShutdownEvent, ShutdownReason};
use crate::lifecycle::signals;
use crate::lifecycle::trigger::{self, Trigger};

/// Set once OS signal interception has been installed in this process.
static SIGNALS_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Coordinator for graceful shutdown.
///
/// Create one at startup and hand clones to every task that needs to
/// observe shutdown or be waited for. All clones share the same state.
#[derive(Debug, Clone)]
pub struct Shutdown {
    event: ShutdownEvent,
    trigger: Trigger,
    workers: WaitGroup,
}

impl Shutdown {
    /// Create a coordinator that only reacts to manual triggers.
    ///
    /// Spawns the dispatcher, so this must be called within a Tokio runtime.
    pub fn new() -> Self {
        let event = ShutdownEvent::new();
        let (trigger, dispatcher) = trigger::channel(event.clone());
        tokio::spawn(dispatcher.run());

        Self {
            event,
            trigger,
            workers: WaitGroup::new(),
        }
    }

    /// Create a coordinator and intercept the configured OS signals.
    ///
    /// Signal interception is process-wide and may be installed only once.
    pub fn install(config: &SignalConfig) -> Result<Self, ShutdownError> {
        if SIGNALS_INSTALLED.swap(true, Ordering::SeqCst) {
            return Err(ShutdownError::AlreadyInstalled);
        }

        let shutdown = Self::new();
        if let Err(e) = signals::listen(&config.watch, shutdown.trigger.clone()) {
            SIGNALS_INSTALLED.store(false, Ordering::SeqCst);
            return Err(e);
        }

        tracing::info!(signals = ?config.watch, "Shutdown coordinator installed");
        Ok(shutdown)
    }

    /// Trigger shutdown as if a termination signal had arrived.
    ///
    /// Never blocks; repeated calls are harmless.
    pub fn initiate_manual(&self) {
        tracing::info!("Manual shutdown initiated");
        self.trigger.send(ShutdownReason::Manual);
    }

    /// Whether shutdown has begun. Never suspends.
    pub fn initiated(&self) -> bool {
        self.event.is_fired()
    }

    /// Wait for shutdown to begin.
    pub async fn wait(&self) {
        self.event.wait().await;
    }

    /// Why shutdown began, once it has.
    pub fn reason(&self) -> Option<ShutdownReason> {
        self.event.reason()
    }

    /// The underlying one-shot event.
    pub fn event(&self) -> &ShutdownEvent {
        &self.event
    }

    /// Cancellation-scope view of the shutdown.
    pub fn context(&self) -> ShutdownContext {
        self.event.context()
    }

    /// Workers the entry point should wait for before exiting.
    pub fn workers(&self) -> &WaitGroup {
        &self.workers
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
