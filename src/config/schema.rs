//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file is a valid config.

use serde::{Deserialize, Serialize};

use crate::lifecycle::TerminationSignal;

/// Root configuration for the shutdown coordinator and its demo entry point.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// OS signals that initiate shutdown.
    pub signals: SignalConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Entry point drain settings.
    pub drain: DrainConfig,
}

/// Signal interception configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Signals to intercept. Only the first delivery is intercepted.
    pub watch: Vec<TerminationSignal>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            watch: TerminationSignal::DEFAULT.to_vec(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Fallback `tracing` filter when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "shutdown_coordinator=info,shutdown_demo=info".to_string(),
        }
    }
}

/// How long the entry point waits for registered workers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DrainConfig {
    /// Grace period in seconds after shutdown begins.
    pub grace_period_secs: u64,
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 20,
        }
    }
}
