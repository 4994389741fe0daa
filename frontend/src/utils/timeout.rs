use std::{future::Future, time::Duration};

/// Resolves to `None` when `fut` does not complete within `limit`.
#[cfg(not(target_arch = "wasm32"))]
pub async fn with_timeout<F>(limit: Duration, fut: F) -> Option<F::Output>
where
    F: Future,
{
    tokio::time::timeout(limit, fut).await.ok()
}

/// Resolves to `None` when `fut` does not complete within `limit`.
#[cfg(target_arch = "wasm32")]
pub async fn with_timeout<F>(limit: Duration, fut: F) -> Option<F::Output>
where
    F: Future,
{
    use futures::future::{select, Either};

    let millis = u32::try_from(limit.as_millis()).unwrap_or(u32::MAX);
    let timer = gloo_timers::future::TimeoutFuture::new(millis);
    match select(Box::pin(fut), timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(_) => None,
    }
}
