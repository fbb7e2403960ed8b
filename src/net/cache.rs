//! Key-addressed read-through cache for authenticated API resources.
//!
//! ARCHITECTURE
//! ============
//! Each key (an endpoint path) owns one `CacheEntry`. A request for a key is
//! started by exactly one "leader" call; any `load`/`revalidate` arriving while
//! that key is `Loading` parks on a oneshot channel and resolves with the
//! leader's result. Listeners registered through `subscribe` see every state
//! transition of their key.
//!
//! STATE MACHINE
//! =============
//! `Idle -> Loading -> {Success, Error}`; `Success` and `Error` go back to
//! `Loading` on revalidation. A failed refresh keeps the previous `data`.
//!
//! CONCURRENCY
//! ===========
//! All state sits behind one `Mutex`, held only for bookkeeping and never
//! across an await or while running listener callbacks. A leader whose future
//! is dropped mid-flight restores the entry's previous status on drop.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use futures::channel::oneshot;

use super::error::FetchError;

/// Produces the value for a cache key.
pub trait Fetcher<T> {
    fn fetch(&self, key: &str) -> impl Future<Output = Result<T, FetchError>>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Snapshot of one cached resource.
pub struct CacheEntry<T> {
    pub key: String,
    /// Last successfully fetched value; survives failed refreshes.
    pub data: Option<Arc<T>>,
    pub status: FetchStatus,
    pub error: Option<FetchError>,
    /// Milliseconds since the Unix epoch of the last successful fetch.
    pub last_fetched_at: Option<u64>,
}

impl<T> CacheEntry<T> {
    #[must_use]
    pub fn idle(key: &str) -> Self {
        Self {
            key: key.to_owned(),
            data: None,
            status: FetchStatus::Idle,
            error: None,
            last_fetched_at: None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    fn is_fresh(&self, now: u64, fresh_for: Duration) -> bool {
        let window = u64::try_from(fresh_for.as_millis()).unwrap_or(u64::MAX);
        self.status == FetchStatus::Success
            && self
                .last_fetched_at
                .is_some_and(|at| now.saturating_sub(at) < window)
    }
}

impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            data: self.data.clone(),
            status: self.status,
            error: self.error.clone(),
            last_fetched_at: self.last_fetched_at,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for CacheEntry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("data", &self.data)
            .field("status", &self.status)
            .field("error", &self.error)
            .field("last_fetched_at", &self.last_fetched_at)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for CacheEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.data == other.data
            && self.status == other.status
            && self.error == other.error
            && self.last_fetched_at == other.last_fetched_at
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a successful entry is served by `load` without a new request.
    pub fresh_for: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            fresh_for: Duration::from_secs(2),
        }
    }
}

/// Millisecond wall clock used for `last_fetched_at`.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            js_sys::Date::now() as u64
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

type Listener<T> = Arc<dyn Fn(&CacheEntry<T>) + Send + Sync>;

struct Inner<T> {
    entries: HashMap<String, CacheEntry<T>>,
    waiters: HashMap<String, Vec<oneshot::Sender<CacheEntry<T>>>>,
    listeners: HashMap<String, Vec<(u64, Listener<T>)>>,
    /// Bumped by `clear`; results of requests from an older epoch are dropped.
    epoch: u64,
    next_listener_id: u64,
}

impl<T> Default for Inner<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            waiters: HashMap::new(),
            listeners: HashMap::new(),
            epoch: 0,
            next_listener_id: 0,
        }
    }
}

impl<T> Inner<T> {
    fn listeners_for(&self, key: &str) -> Vec<Listener<T>> {
        self.listeners
            .get(key)
            .map(|ls| ls.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default()
    }
}

fn notify<T>(listeners: &[Listener<T>], entry: &CacheEntry<T>) {
    for listener in listeners {
        listener(entry);
    }
}

/// Shared read-through cache; clones share the same entries.
pub struct ResourceCache<T> {
    inner: Arc<Mutex<Inner<T>>>,
    config: CacheConfig,
    clock: Clock,
}

impl<T> Clone for ResourceCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config,
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T: Send + Sync + 'static> Default for ResourceCache<T> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

enum Start<T> {
    Join(oneshot::Receiver<CacheEntry<T>>),
    Lead {
        previous: FetchStatus,
        epoch: u64,
        snapshot: CacheEntry<T>,
        listeners: Vec<Listener<T>>,
    },
}

enum Outcome<T> {
    Done(Result<T, FetchError>),
    Abandoned(FetchStatus),
}

impl<T: Send + Sync + 'static> ResourceCache<T> {
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(now_millis))
    }

    #[must_use]
    pub fn with_clock(config: CacheConfig, clock: Clock) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            config,
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current snapshot for `key`; `Idle` if the key was never requested.
    #[must_use]
    pub fn entry(&self, key: &str) -> CacheEntry<T> {
        self.lock()
            .entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| CacheEntry::idle(key))
    }

    /// Read-through access: serve a fresh entry as-is, otherwise request it.
    pub async fn load<F: Fetcher<T>>(&self, key: &str, fetcher: &F) -> CacheEntry<T> {
        let now = (self.clock)();
        let fresh = self
            .lock()
            .entries
            .get(key)
            .filter(|entry| entry.is_fresh(now, self.config.fresh_for))
            .cloned();
        match fresh {
            Some(entry) => entry,
            None => self.request(key, fetcher).await,
        }
    }

    /// Request `key` regardless of freshness, joining an in-flight request if any.
    pub async fn revalidate<F: Fetcher<T>>(&self, key: &str, fetcher: &F) -> CacheEntry<T> {
        self.request(key, fetcher).await
    }

    async fn request<F: Fetcher<T>>(&self, key: &str, fetcher: &F) -> CacheEntry<T> {
        let start = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            let entry = inner
                .entries
                .entry(key.to_owned())
                .or_insert_with(|| CacheEntry::idle(key));
            if entry.is_loading() {
                let (tx, rx) = oneshot::channel();
                inner.waiters.entry(key.to_owned()).or_default().push(tx);
                Start::Join(rx)
            } else {
                let previous = entry.status;
                entry.status = FetchStatus::Loading;
                let snapshot = entry.clone();
                Start::Lead {
                    previous,
                    epoch: inner.epoch,
                    snapshot,
                    listeners: inner.listeners_for(key),
                }
            }
        };

        match start {
            Start::Join(rx) => match rx.await {
                Ok(entry) => entry,
                // Leader went away (cleared cache); report whatever is there now.
                Err(oneshot::Canceled) => self.entry(key),
            },
            Start::Lead {
                previous,
                epoch,
                snapshot,
                listeners,
            } => {
                notify(&listeners, &snapshot);
                let in_flight = InFlight {
                    cache: self,
                    key,
                    epoch,
                    previous: Some(previous),
                };
                let result = fetcher.fetch(key).await;
                in_flight.complete(result)
            }
        }
    }

    fn finish(&self, key: &str, epoch: u64, outcome: Outcome<T>) -> CacheEntry<T> {
        let (snapshot, waiters, listeners) = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            if inner.epoch != epoch {
                return inner
                    .entries
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| CacheEntry::idle(key));
            }

            let entry = inner
                .entries
                .entry(key.to_owned())
                .or_insert_with(|| CacheEntry::idle(key));
            match outcome {
                Outcome::Done(Ok(data)) => {
                    entry.data = Some(Arc::new(data));
                    entry.error = None;
                    entry.status = FetchStatus::Success;
                    entry.last_fetched_at = Some((self.clock)());
                }
                Outcome::Done(Err(err)) => {
                    leptos::logging::warn!("fetch {key} failed: {err:?}");
                    entry.error = Some(err);
                    entry.status = FetchStatus::Error;
                }
                Outcome::Abandoned(previous) => {
                    entry.status = previous;
                }
            }
            let snapshot = entry.clone();
            let waiters = inner.waiters.remove(key).unwrap_or_default();
            (snapshot, waiters, inner.listeners_for(key))
        };

        for waiter in waiters {
            let _ = waiter.send(snapshot.clone());
        }
        notify(&listeners, &snapshot);
        snapshot
    }

    /// Drop every entry. Requests already in flight finish without writing.
    pub fn clear(&self) {
        let listeners = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            inner.epoch += 1;
            inner.entries.clear();
            inner.waiters.clear();
            inner
                .listeners
                .iter()
                .flat_map(|(key, ls)| ls.iter().map(move |(_, l)| (key.clone(), Arc::clone(l))))
                .collect::<Vec<_>>()
        };
        for (key, listener) in listeners {
            listener(&CacheEntry::idle(&key));
        }
    }

    /// Call `listener` on every state change of `key` until the returned
    /// `Subscription` is dropped.
    pub fn subscribe(&self, key: &str, listener: impl Fn(&CacheEntry<T>) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut inner = self.lock();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner
                .listeners
                .entry(key.to_owned())
                .or_default()
                .push((id, Arc::new(listener)));
            id
        };

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        let key = key.to_owned();
        Subscription {
            unsubscribe: Some(Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
                if let Some(ls) = inner.listeners.get_mut(&key) {
                    ls.retain(|(lid, _)| *lid != id);
                    if ls.is_empty() {
                        inner.listeners.remove(&key);
                    }
                }
            })),
        }
    }

    #[cfg(test)]
    fn listener_count(&self, key: &str) -> usize {
        self.lock().listeners.get(key).map_or(0, Vec::len)
    }
}

/// Restores the entry if the leader's future is dropped before the fetch resolves.
struct InFlight<'a, T: Send + Sync + 'static> {
    cache: &'a ResourceCache<T>,
    key: &'a str,
    epoch: u64,
    previous: Option<FetchStatus>,
}

impl<T: Send + Sync + 'static> InFlight<'_, T> {
    fn complete(mut self, result: Result<T, FetchError>) -> CacheEntry<T> {
        self.previous = None;
        self.cache.finish(self.key, self.epoch, Outcome::Done(result))
    }
}

impl<T: Send + Sync + 'static> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.cache.finish(self.key, self.epoch, Outcome::Abandoned(previous));
        }
    }
}

/// Listener registration; unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Unsubscribe now instead of at drop.
    pub fn cancel(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
