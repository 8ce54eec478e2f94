//! End-to-end worker scenarios against a single coordinator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use shutdown_coordinator::{Shutdown, ShutdownReason};
use tokio::sync::{mpsc, Mutex};
use tokio::time::timeout;

const WORKERS: usize = 3;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn guarded_workers_drain_after_manual_trigger() {
    let shutdown = Shutdown::new();

    // Keep the work source saturated so workers always have a next unit.
    let (tx, rx) = mpsc::channel::<u32>(10_000);
    for i in 0..10_000 {
        tx.try_send(i).unwrap();
    }
    let rx = Arc::new(Mutex::new(rx));
    let begun = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(AtomicUsize::new(0));

    for _ in 0..WORKERS {
        shutdown.workers().add(1);
        let shutdown = shutdown.clone();
        let rx = Arc::clone(&rx);
        let begun = Arc::clone(&begun);
        let finished = Arc::clone(&finished);
        tokio::spawn(async move {
            while !shutdown.initiated() {
                let item = {
                    let mut rx = rx.lock().await;
                    tokio::select! {
                        biased;
                        _ = shutdown.wait() => None,
                        item = rx.recv() => item,
                    }
                };
                let Some(_item) = item else { break };
                begun.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            finished.fetch_add(1, Ordering::SeqCst);
            shutdown.workers().done();
        });
    }

    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown.initiate_manual();
    shutdown.wait().await;
    assert!(shutdown.initiated());
    let begun_at_shutdown = begun.load(Ordering::SeqCst);

    timeout(Duration::from_secs(2), shutdown.workers().wait())
        .await
        .expect("workers did not drain in time");

    assert_eq!(finished.load(Ordering::SeqCst), WORKERS);
    // A worker that passed its guard just before the event fired may still
    // take one unit; nothing beyond that.
    assert!(begun.load(Ordering::SeqCst) - begun_at_shutdown <= WORKERS);
    assert!(!rx.lock().await.is_empty(), "workers drained the whole queue");
    assert_eq!(shutdown.reason(), Some(ShutdownReason::Manual));
}

#[tokio::test]
async fn trigger_before_any_waiter_is_not_lost() {
    let shutdown = Shutdown::new();
    shutdown.initiate_manual();

    let late = shutdown.clone();
    let waiter = tokio::spawn(async move { late.wait().await });

    timeout(Duration::from_secs(1), waiter)
        .await
        .expect("late waiter missed the trigger")
        .unwrap();
    assert!(shutdown.initiated());
}

#[tokio::test]
async fn entry_point_waits_for_registered_workers() {
    let shutdown = Shutdown::new();
    let saved = Arc::new(AtomicUsize::new(0));

    for _ in 0..WORKERS {
        let guard = shutdown.workers().register();
        let shutdown = shutdown.clone();
        let saved = Arc::clone(&saved);
        tokio::spawn(async move {
            let _guard = guard;
            shutdown.wait().await;
            tokio::time::sleep(Duration::from_millis(20)).await;
            saved.fetch_add(1, Ordering::SeqCst);
        });
    }

    shutdown.initiate_manual();
    shutdown.wait().await;
    shutdown
        .workers()
        .wait_timeout(Duration::from_secs(2))
        .await
        .expect("registered workers not drained");

    assert_eq!(saved.load(Ordering::SeqCst), WORKERS);
}

#[tokio::test]
async fn context_aborts_in_flight_operation() {
    let shutdown = Shutdown::new();
    let ctx = shutdown.context();

    let op = tokio::spawn(async move {
        ctx.run(tokio::time::sleep(Duration::from_secs(30))).await
    });

    tokio::time::sleep(Duration::from_millis(10)).await;
    shutdown.initiate_manual();

    let result = timeout(Duration::from_secs(1), op)
        .await
        .expect("operation not aborted")
        .unwrap();
    assert_eq!(result.unwrap_err().reason, ShutdownReason::Manual);
}
