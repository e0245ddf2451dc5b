use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::*;

#[test]
fn spawn_without_runtime_hands_task_back() {
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    let task = async move {
        flag.store(true, Ordering::SeqCst);
    };

    assert!(!can_spawn());
    let returned = spawn_detached(task);
    assert!(returned.is_err());

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
    if let Err(task) = returned {
        runtime.block_on(task);
    }
    assert!(ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn spawn_inside_runtime_runs_detached() {
    assert!(can_spawn());
    let (tx, rx) = tokio::sync::oneshot::channel();
    assert!(
        spawn_detached(async move {
            let _ = tx.send(7);
        })
        .is_ok()
    );
    assert_eq!(rx.await.unwrap(), 7);
}

#[tokio::test]
async fn sleep_waits_for_duration() {
    let started = tokio::time::Instant::now();
    sleep(Duration::from_millis(20)).await;
    assert!(started.elapsed() >= Duration::from_millis(20));
}
