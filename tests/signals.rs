//! OS signal interception. Lives in its own test binary because the
//! installed handlers are process-wide.

#![cfg(unix)]

use std::os::unix::process::ExitStatusExt;
use std::process::Command;
use std::time::Duration;

use shutdown_coordinator::config::SignalConfig;
use shutdown_coordinator::{Shutdown, ShutdownError, ShutdownReason, TerminationSignal};
use tokio::time::timeout;

#[tokio::test]
async fn first_signal_initiates_shutdown_once() {
    let config = SignalConfig {
        watch: vec![TerminationSignal::User1],
    };
    let shutdown = Shutdown::install(&config).expect("install signal interception");
    assert!(!shutdown.initiated());

    signal_hook::low_level::raise(signal_hook::consts::SIGUSR1).unwrap();

    timeout(Duration::from_secs(2), shutdown.wait())
        .await
        .expect("signal did not initiate shutdown");
    assert_eq!(
        shutdown.reason(),
        Some(ShutdownReason::Signal(TerminationSignal::User1))
    );

    // A manual trigger afterwards changes nothing.
    shutdown.initiate_manual();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(
        shutdown.reason(),
        Some(ShutdownReason::Signal(TerminationSignal::User1))
    );

    assert!(matches!(
        Shutdown::install(&config),
        Err(ShutdownError::AlreadyInstalled)
    ));
}

/// Set when this binary is re-run to host the second-signal scenario.
const SECOND_SIGNAL_CHILD: &str = "SHUTDOWN_COORDINATOR_SECOND_SIGNAL_CHILD";
const FIRED_MARKER: &str = "first SIGUSR2 intercepted";
const SURVIVED_MARKER: &str = "survived second SIGUSR2";

/// Runs only inside the child process started by
/// `second_signal_runs_default_action`.
#[tokio::test]
async fn second_signal_child() {
    if std::env::var_os(SECOND_SIGNAL_CHILD).is_none() {
        return;
    }

    let config = SignalConfig {
        watch: vec![TerminationSignal::User2],
    };
    let shutdown = Shutdown::install(&config).expect("install signal interception");

    signal_hook::low_level::raise(signal_hook::consts::SIGUSR2).unwrap();
    timeout(Duration::from_secs(2), shutdown.wait())
        .await
        .expect("first signal did not initiate shutdown");
    println!("{FIRED_MARKER}");

    signal_hook::low_level::raise(signal_hook::consts::SIGUSR2).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    println!("{SURVIVED_MARKER}");
}

#[test]
fn second_signal_runs_default_action() {
    let exe = std::env::current_exe().unwrap();
    let output = Command::new(exe)
        .args([
            "second_signal_child",
            "--exact",
            "--nocapture",
            "--test-threads=1",
        ])
        .env(SECOND_SIGNAL_CHILD, "1")
        .output()
        .expect("spawn child test process");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(FIRED_MARKER), "child output: {stdout}");
    assert!(!stdout.contains(SURVIVED_MARKER), "child output: {stdout}");
    assert_eq!(output.status.signal(), Some(signal_hook::consts::SIGUSR2));
}
