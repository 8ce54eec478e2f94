//! Process-wide graceful shutdown coordination.
//!
//! A [`Shutdown`] is created once at startup and passed to every task. It
//! combines a one-shot broadcast event (fired by the first OS termination
//! signal or manual trigger), a non-blocking [`Shutdown::initiated`] query,
//! a cancellation-scope view, and a [`WaitGroup`] the entry point drains
//! before exiting.
//!
//! ```no_run
//! # async fn app() -> Result<(), shutdown_coordinator::ShutdownError> {
//! use shutdown_coordinator::{config::SignalConfig, Shutdown};
//!
//! let shutdown = Shutdown::install(&SignalConfig::default())?;
//!
//! let worker = shutdown.clone();
//! let guard = shutdown.workers().register();
//! tokio::spawn(async move {
//!     let _guard = guard;
//!     while !worker.initiated() {
//!         tokio::select! {
//!             _ = worker.wait() => break,
//!             _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => {}
//!         }
//!     }
//! });
//!
//! shutdown.wait().await;
//! shutdown.workers().wait().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::CoordinatorConfig;
pub use error::{DrainTimeout, ShutdownError, ShutdownInitiated};
pub use lifecycle::{
    Shutdown, ShutdownContext, ShutdownEvent, ShutdownReason, TerminationSignal, WaitGroup,
    WorkerGuard,
};
