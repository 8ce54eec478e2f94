//! Error types shared across the crate.

use thiserror::Error;

use crate::lifecycle::event::ShutdownReason;

/// Errors raised while setting up the coordinator.
#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("failed to register signal handler: {0}")]
    SignalRegistration(#[from] std::io::Error),

    #[error("OS signal interception is already installed for this process")]
    AlreadyInstalled,

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// Returned by operations aborted because shutdown began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("shutdown initiated: {reason}")]
pub struct ShutdownInitiated {
    pub reason: ShutdownReason,
}

/// Registered workers did not finish within the drain deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{outstanding} worker(s) still running after drain deadline")]
pub struct DrainTimeout {
    pub outstanding: usize,
}
