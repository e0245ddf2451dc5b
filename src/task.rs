//! Detached task spawning for the native and browser builds.
//!
//! DESIGN
//! ======
//! Native builds spawn on the ambient tokio runtime, and a synchronous
//! caller may not have entered one yet. The task is then handed back so the
//! caller can hold it until a runtime is available.
//!
//! The wasm32 build has no tokio runtime. Tasks go to the page's microtask
//! queue through `wasm_bindgen_futures::spawn_local`, which always accepts
//! them. Browser futures are not `Send`, so the `Send` bound only applies
//! natively.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + ?Sized> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> MaybeSend for T {}

/// A future that can run detached from whoever scheduled it.
pub trait Task: Future<Output = ()> + MaybeSend + 'static {}
impl<F: Future<Output = ()> + MaybeSend + 'static> Task for F {}

pub type BoxTask = Pin<Box<dyn Task>>;

// =============================================================================
// SPAWN
// =============================================================================

/// Spawn `task` without keeping a handle. Returns the task when nothing can
/// drive it yet.
///
/// # Errors
///
/// Hands `task` back untouched when no tokio runtime is entered.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_detached<F: Task>(task: F) -> Result<(), F> {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            drop(handle.spawn(task));
            Ok(())
        }
        Err(_) => Err(task),
    }
}

/// Spawn `task` on the page's microtask queue.
///
/// # Errors
///
/// Never; the browser always has an executor.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::unnecessary_wraps)]
pub fn spawn_detached<F: Task>(task: F) -> Result<(), F> {
    wasm_bindgen_futures::spawn_local(task);
    Ok(())
}

/// Whether `spawn_detached` would accept a task right now.
#[must_use]
pub fn can_spawn() -> bool {
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::runtime::Handle::try_current().is_ok()
    }
    #[cfg(target_arch = "wasm32")]
    {
        true
    }
}

// =============================================================================
// TIMERS
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}
