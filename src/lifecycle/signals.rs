//! OS signal handling.
//!
//! # Responsibilities
//! - Subscribe to the configured termination signals (once per process)
//! - Forward the first one into the trigger intake
//! - Get out of the way afterwards
//!
//! # Design Decisions
//! - Single-shot: after the first intercepted signal, a repeat of any
//!   watched signal runs the OS default action, so a second Ctrl+C
//!   force-kills a process that is slow to drain
//! - Delivery happens on a dedicated thread through signal-hook's iterator;
//!   the handler itself only writes to a pipe
//! - Non-unix targets only watch Ctrl+C through Tokio

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ShutdownError;
use crate::lifecycle::event::ShutdownReason;
use crate::lifecycle::trigger::Trigger;

/// Termination requests the coordinator can intercept.
///
/// Config files may spell them `interrupt`, `int` or `SIGINT`, case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TerminationSignal {
    /// SIGINT (Ctrl+C).
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// SIGHUP.
    Hangup,
    /// SIGQUIT.
    Quit,
    /// SIGUSR1.
    User1,
    /// SIGUSR2.
    User2,
}

impl TerminationSignal {
    /// The default watch set: interrupt and terminate.
    pub const DEFAULT: [TerminationSignal; 2] =
        [TerminationSignal::Interrupt, TerminationSignal::Terminate];

    pub const ALL: [TerminationSignal; 6] = [
        TerminationSignal::Interrupt,
        TerminationSignal::Terminate,
        TerminationSignal::Hangup,
        TerminationSignal::Quit,
        TerminationSignal::User1,
        TerminationSignal::User2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TerminationSignal::Interrupt => "SIGINT",
            TerminationSignal::Terminate => "SIGTERM",
            TerminationSignal::Hangup => "SIGHUP",
            TerminationSignal::Quit => "SIGQUIT",
            TerminationSignal::User1 => "SIGUSR1",
            TerminationSignal::User2 => "SIGUSR2",
        }
    }

    /// Raw signal number.
    #[cfg(unix)]
    pub fn as_raw(&self) -> std::os::raw::c_int {
        use signal_hook::consts::{SIGHUP, SIGINT, SIGQUIT, SIGTERM, SIGUSR1, SIGUSR2};
        match self {
            TerminationSignal::Interrupt => SIGINT,
            TerminationSignal::Terminate => SIGTERM,
            TerminationSignal::Hangup => SIGHUP,
            TerminationSignal::Quit => SIGQUIT,
            TerminationSignal::User1 => SIGUSR1,
            TerminationSignal::User2 => SIGUSR2,
        }
    }

    /// Inverse of [`as_raw`](Self::as_raw); `None` for signals we never watch.
    #[cfg(unix)]
    pub fn from_raw(raw: std::os::raw::c_int) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_raw() == raw)
    }
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognized signal names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown termination signal '{0}'")]
pub struct UnknownSignal(pub String);

impl FromStr for TerminationSignal {
    type Err = UnknownSignal;

    /// Accepts `interrupt`, `int` or `SIGINT` style names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_prefix("sig").unwrap_or(&lower);
        match name {
            "interrupt" | "int" => Ok(TerminationSignal::Interrupt),
            "terminate" | "term" => Ok(TerminationSignal::Terminate),
            "hangup" | "hup" => Ok(TerminationSignal::Hangup),
            "quit" => Ok(TerminationSignal::Quit),
            "user1" | "usr1" => Ok(TerminationSignal::User1),
            "user2" | "usr2" => Ok(TerminationSignal::User2),
            _ => Err(UnknownSignal(s.to_string())),
        }
    }
}

impl TryFrom<String> for TerminationSignal {
    type Error = UnknownSignal;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Register the handler chain for `raw`, recording every handler id in
/// `ids` as it is installed.
///
/// Registration order matters: the default-action check must run before
/// `consumed` is set, otherwise the first signal would already kill us.
#[cfg(unix)]
fn register_handlers(
    raw: &[std::os::raw::c_int],
    consumed: &std::sync::Arc<std::sync::atomic::AtomicBool>,
    ids: &mut Vec<signal_hook::SigId>,
) -> std::io::Result<signal_hook::iterator::Signals> {
    use std::sync::Arc;

    use signal_hook::flag;
    use signal_hook::iterator::Signals;

    for sig in raw {
        ids.push(flag::register_conditional_default(*sig, Arc::clone(consumed))?);
    }
    for sig in raw {
        ids.push(flag::register(*sig, Arc::clone(consumed))?);
    }
    Signals::new(raw)
}

/// Remove handlers installed by a registration that did not complete.
#[cfg(unix)]
fn unregister_handlers(ids: &[signal_hook::SigId]) {
    for id in ids {
        signal_hook::low_level::unregister(*id);
    }
}

/// Start intercepting `watch` and forward the first hit to `trigger`.
///
/// On error no handler is left installed.
#[cfg(unix)]
pub(crate) fn listen(
    watch: &[TerminationSignal],
    trigger: Trigger,
) -> Result<(), ShutdownError> {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    let raw: Vec<_> = watch.iter().map(TerminationSignal::as_raw).collect();
    let consumed = Arc::new(AtomicBool::new(false));

    let mut ids = Vec::new();
    let mut signals = match register_handlers(&raw, &consumed, &mut ids) {
        Ok(signals) => signals,
        Err(e) => {
            unregister_handlers(&ids);
            return Err(e.into());
        }
    };

    let watch = watch.to_vec();
    let spawned = std::thread::Builder::new()
        .name("shutdown-signals".into())
        .spawn(move || {
            let first = signals.forever().find_map(|raw_sig| {
                TerminationSignal::from_raw(raw_sig).filter(|s| watch.contains(s))
            });
            if let Some(signal) = first {
                tracing::info!(signal = %signal, "Received signal, broadcasting shutdown");
                trigger.send(ShutdownReason::Signal(signal));
            }
            signals.handle().close();
        });
    if let Err(e) = spawned {
        unregister_handlers(&ids);
        return Err(e.into());
    }

    tracing::debug!(signals = ?raw, "Signal interception installed");
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn listen(
    watch: &[TerminationSignal],
    trigger: Trigger,
) -> Result<(), ShutdownError> {
    for signal in watch {
        if *signal != TerminationSignal::Interrupt {
            tracing::warn!(signal = %signal, "Signal not supported on this platform, ignoring");
        }
    }
    if !watch.contains(&TerminationSignal::Interrupt) {
        return Ok(());
    }

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!(signal = %TerminationSignal::Interrupt, "Received signal, broadcasting shutdown");
                trigger.send(ShutdownReason::Signal(TerminationSignal::Interrupt));
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
        }
    });
    Ok(())
}
