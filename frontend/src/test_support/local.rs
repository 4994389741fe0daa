use leptos::*;
use std::{future::Future, time::Duration};

/// Runs `f` inside a reactive runtime on a `LocalSet`, so tasks started with
/// `spawn_local` make progress while the returned future is awaited.
pub async fn with_local_runtime<F, Fut>(f: F) -> Fut::Output
where
    F: FnOnce() -> Fut,
    Fut: Future,
{
    let runtime = create_runtime();
    let output = tokio::task::LocalSet::new().run_until(f()).await;
    runtime.dispose();
    output
}

/// Lets every ready local task run to its next pending point.
pub async fn flush_tasks() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Polls `done` until it holds, giving real I/O a chance to finish.
pub async fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if done() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    done()
}
