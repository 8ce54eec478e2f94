//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     First SIGTERM/SIGINT → intake queue
//!     Any later one → OS default action (force kill)
//!
//! Trigger (trigger.rs):
//!     initiate_manual() → intake queue
//!     intake queue → Dispatcher → ShutdownEvent::fire (once)
//!
//! Event (event.rs, context.rs):
//!     fired → every waiter, initiated() == true, context done with reason
//!
//! Completion (completion.rs):
//!     workers register → finish → WaitGroup::wait() returns
//! ```
//!
//! # Design Decisions
//! - One `Shutdown` per process, passed explicitly to every task
//! - No timeouts inside the primitive; callers layer their own deadline
//! - Deregistering more workers than registered is a panic

pub mod completion;
pub mod context;
pub mod event;
pub mod shutdown;
pub mod signals;
pub(crate) mod trigger;

pub use completion::{WaitGroup, WorkerGuard};
pub use context::ShutdownContext;
pub use event::{ShutdownEvent, ShutdownReason};
pub use shutdown::Shutdown;
pub use signals::TerminationSignal;
