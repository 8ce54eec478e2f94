//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! lifecycle events (signal, trigger, broadcast, worker accounting)
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//! ```
//!
//! # Design Decisions
//! - Failures here are never propagated into the shutdown path
//! - Metrics are cheap (atomic updates behind the facade)

pub mod logging;
pub mod metrics;
