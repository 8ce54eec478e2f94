//! Metrics collection.
//!
//! # Metrics
//! - `shutdown_triggers_total` (counter): the request that fired the event, by source
//! - `shutdown_initiated` (gauge): 1 once the shutdown event has fired
//! - `shutdown_outstanding_workers` (gauge): registered workers still running
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no-ops until the host installs a recorder
//! - Recorded by the dispatcher, so requests dropped or read after firing are never counted

use crate::lifecycle::ShutdownReason;

pub fn record_trigger(reason: &ShutdownReason) {
    let source = match reason {
        ShutdownReason::Signal(signal) => signal.name(),
        ShutdownReason::Manual => "manual",
    };
    metrics::counter!("shutdown_triggers_total", "source" => source).increment(1);
}

pub fn record_initiated() {
    metrics::gauge!("shutdown_initiated").set(1.0);
}

pub fn set_outstanding_workers(count: usize) {
    metrics::gauge!("shutdown_outstanding_workers").set(count as f64);
}
