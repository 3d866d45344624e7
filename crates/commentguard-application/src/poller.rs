//! Interval polling on top of the query cache.
//!
//! A poll refetches its key on a fixed interval, keeping long-lived
//! views (the dashboard) current without user action. The handle stops
//! the loop when dropped, so an unmounted view cannot leak a timer.

use crate::query_cache::{QueryCache, QueryKey};
use commentguard_core::error::Result;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Owns a running poll loop. Dropping it stops the loop.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stops the poll explicitly. Equivalent to dropping the handle.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl QueryCache {
    /// Fetches `key` immediately, then refetches every `interval`.
    ///
    /// Each tick marks the key stale before fetching, so the loop always
    /// issues a fresh request instead of reading the cached value. Fetch
    /// errors are logged and the loop keeps ticking.
    pub fn spawn_poll<F, Fut>(&self, key: QueryKey, interval: Duration, fetch_fn: F) -> PollHandle
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let cache = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                cache.invalidate_key(&key).await;
                if let Err(err) = cache.fetch(key.clone(), &fetch_fn).await {
                    tracing::warn!(%key, %err, "poll fetch failed");
                }
            }
        });
        PollHandle { task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_poll_refetches_on_interval() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let handle = cache.spawn_poll(QueryKey::new("dashboard"), Duration::from_millis(20), {
            let calls = calls.clone();
            move || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!({"total": n}))
                }
            }
        });

        tokio::time::sleep(Duration::from_millis(90)).await;
        assert!(calls.load(Ordering::SeqCst) >= 3);
        drop(handle);
    }

    #[tokio::test]
    async fn test_dropping_handle_stops_the_loop() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let handle = cache.spawn_poll(QueryKey::new("dashboard"), Duration::from_millis(15), {
            let calls = calls.clone();
            move || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!({}))
                }
            }
        });

        tokio::time::sleep(Duration::from_millis(40)).await;
        drop(handle);
        let at_drop = calls.load(Ordering::SeqCst);
        assert!(at_drop >= 1);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(calls.load(Ordering::SeqCst), at_drop);
    }

    #[tokio::test]
    async fn test_poll_survives_fetch_errors() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let _handle = cache.spawn_poll(QueryKey::new("dashboard"), Duration::from_millis(15), {
            let calls = calls.clone();
            move || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    if n == 0 {
                        Err(commentguard_core::CommentGuardError::network(
                            "backend down",
                        ))
                    } else {
                        Ok(json!({}))
                    }
                }
            }
        });

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(calls.load(Ordering::SeqCst) >= 3);
    }
}
