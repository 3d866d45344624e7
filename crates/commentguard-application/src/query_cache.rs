//! Keyed query cache with request deduplication and invalidation.
//!
//! Every view-facing fetch goes through here. Results are cached under a
//! key of resource name plus all result-affecting parameters; concurrent
//! observations of one key share a single in-flight request; mutations
//! invalidate every key of the affected resource, and the next
//! observation refetches. The cache never patches a stored value in
//! place: refetches replace it wholesale.
//!
//! Ordering guarantee: each fetch for a key gets an issuance number. A
//! fetch that resolves after a newer fetch was issued for the same key is
//! discarded instead of written, so the cache always holds the result of
//! the newest request, regardless of resolution order.

use commentguard_core::error::{CommentGuardError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, watch};

/// Identifies one cacheable query: resource name plus parameters.
///
/// Two queries with different parameters must never share a slot, so
/// every parameter that affects the result belongs in the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: String,
    params: Vec<String>,
}

impl QueryKey {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            params: Vec::new(),
        }
    }

    /// Appends one result-affecting parameter.
    pub fn with_param(mut self, param: impl ToString) -> Self {
        self.params.push(param.to_string());
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.resource)?;
        for param in &self.params {
            write!(f, ":{param}")?;
        }
        Ok(())
    }
}

/// Observable state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Pending,
    Resolved,
    Error,
}

type FetchOutcome = std::result::Result<Arc<Value>, CommentGuardError>;

enum EntryState {
    Pending,
    Resolved(Arc<Value>),
    Failed(CommentGuardError),
}

struct CacheEntry {
    state: EntryState,
    /// Set by invalidation; a stale entry refetches on next observation.
    stale: bool,
    /// Issuance number of the newest fetch started for this key.
    last_issued: u64,
    /// Receiver for the in-flight fetch, shared by deduped observers.
    inflight: Option<watch::Receiver<Option<FetchOutcome>>>,
    last_fetched_at: Option<Instant>,
    last_observed_at: Instant,
}

impl CacheEntry {
    fn new() -> Self {
        Self {
            state: EntryState::Pending,
            stale: false,
            last_issued: 0,
            inflight: None,
            last_fetched_at: None,
            last_observed_at: Instant::now(),
        }
    }

    fn status(&self) -> FetchStatus {
        match self.state {
            EntryState::Pending => FetchStatus::Pending,
            EntryState::Resolved(_) => FetchStatus::Resolved,
            EntryState::Failed(_) => FetchStatus::Error,
        }
    }
}

struct Inner {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
}

/// Shared query cache. Clones are cheap handles onto one cache.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Observes `key`, fetching if the entry is absent, stale or failed.
    ///
    /// While a fetch for the key is in flight, further observations await
    /// its result instead of issuing another request. The fetch itself
    /// runs on a spawned task, so an observer cancelled mid-await (a view
    /// unmounting) drops its result silently without killing the request
    /// for the other observers or the cache.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, fetch_fn: F) -> Result<Arc<Value>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let mut rx = {
            let mut entries = self.inner.entries.lock().await;
            let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);
            entry.last_observed_at = Instant::now();

            if !entry.stale {
                if let EntryState::Resolved(value) = &entry.state {
                    return Ok(value.clone());
                }
                if let Some(rx) = &entry.inflight {
                    // Dedupe: share the in-flight request.
                    rx.clone()
                } else {
                    self.start_fetch(entry, &key, fetch_fn())
                }
            } else {
                // Invalidated: refetch even if a pre-invalidation request
                // is still in flight. The older issuance gets discarded.
                self.start_fetch(entry, &key, fetch_fn())
            }
        };

        loop {
            if let Some(outcome) = rx.borrow_and_update().clone() {
                return outcome;
            }
            if rx.changed().await.is_err() {
                return Err(CommentGuardError::internal(format!(
                    "fetch for '{key}' was abandoned"
                )));
            }
        }
    }

    /// Typed wrapper over [`fetch`](Self::fetch): the fetched record goes
    /// through the cache as JSON and comes back out as `T`.
    pub async fn fetch_as<T, F, Fut>(&self, key: QueryKey, fetch_fn: F) -> Result<T>
    where
        T: serde::de::DeserializeOwned + serde::Serialize + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let value = self
            .fetch(key, || async move {
                let record = fetch_fn().await?;
                Ok(serde_json::to_value(record)?)
            })
            .await?;
        Ok(serde_json::from_value(value.as_ref().clone())?)
    }

    /// Starts a fetch for `key` on a background task and registers it as
    /// the entry's newest issuance. Returns the receiver to await.
    fn start_fetch(
        &self,
        entry: &mut CacheEntry,
        key: &QueryKey,
        fut: impl Future<Output = Result<Value>> + Send + 'static,
    ) -> watch::Receiver<Option<FetchOutcome>> {
        entry.last_issued += 1;
        entry.stale = false;
        entry.state = EntryState::Pending;
        let issuance = entry.last_issued;

        let (tx, rx) = watch::channel(None);
        entry.inflight = Some(rx.clone());

        let cache = self.clone();
        let key = key.clone();
        tokio::spawn(async move {
            let outcome: FetchOutcome = fut.await.map(Arc::new);
            cache.settle(&key, issuance, &outcome).await;
            // Waiters on this issuance get its result even when a newer
            // fetch superseded it in the cache.
            let _ = tx.send(Some(outcome));
        });

        rx
    }

    /// Writes a fetch outcome into the cache unless a newer fetch was
    /// issued for the key in the meantime (ordering law).
    async fn settle(&self, key: &QueryKey, issuance: u64, outcome: &FetchOutcome) {
        let mut entries = self.inner.entries.lock().await;
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        if entry.last_issued != issuance {
            tracing::debug!(%key, issuance, "discarding superseded fetch result");
            return;
        }
        entry.state = match outcome {
            Ok(value) => EntryState::Resolved(value.clone()),
            Err(err) => EntryState::Failed(err.clone()),
        };
        entry.last_fetched_at = Some(Instant::now());
        entry.inflight = None;
    }

    /// Marks every cached key of `resource` stale, whatever its
    /// parameters. The next observation of each refetches.
    pub async fn invalidate(&self, resource: &str) {
        let mut entries = self.inner.entries.lock().await;
        for (key, entry) in entries.iter_mut() {
            if key.resource() == resource {
                entry.stale = true;
            }
        }
    }

    /// Marks a single key stale.
    pub async fn invalidate_key(&self, key: &QueryKey) {
        let mut entries = self.inner.entries.lock().await;
        if let Some(entry) = entries.get_mut(key) {
            entry.stale = true;
        }
    }

    /// Runs a mutation and, when it succeeds, invalidates the resource it
    /// touched. Failures pass through without invalidating.
    pub async fn mutate<T, Fut>(&self, resource: &str, mutation: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let result = mutation.await?;
        self.invalidate(resource).await;
        Ok(result)
    }

    /// Current status of a key, if cached.
    pub async fn status(&self, key: &QueryKey) -> Option<FetchStatus> {
        let entries = self.inner.entries.lock().await;
        entries.get(key).map(CacheEntry::status)
    }

    /// Retained error of a failed key, for the consumer to render.
    pub async fn error(&self, key: &QueryKey) -> Option<CommentGuardError> {
        let entries = self.inner.entries.lock().await;
        entries.get(key).and_then(|entry| match &entry.state {
            EntryState::Failed(err) => Some(err.clone()),
            _ => None,
        })
    }

    /// Drops entries that have not been observed within `max_idle` and
    /// have no fetch in flight.
    pub async fn evict_idle(&self, max_idle: Duration) {
        let mut entries = self.inner.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, entry| {
            entry.inflight.is_some() || now.duration_since(entry.last_observed_at) <= max_idle
        });
    }

    /// Number of cached keys.
    pub async fn len(&self) -> usize {
        self.inner.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.entries.lock().await.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
