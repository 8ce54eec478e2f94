//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber
//! - Resolve the log filter from `RUST_LOG`, falling back to config
//!
//! # Design Decisions
//! - Logging is best effort: the coordinator never depends on it succeeding
//! - Human-readable fmt output; lifecycle events carry structured fields

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::error::ShutdownError;

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init(config: &ObservabilityConfig) -> Result<(), ShutdownError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .map_err(|e| ShutdownError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| ShutdownError::Logging(e.to_string()))
}
