//! Leptos binding for `ResourceCache`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call `use_resource` to get a reactive view of one cache key. The hook
//! subscribes to the key, kicks off a read-through load, and re-subscribes when
//! the key closure changes. Only the current key's transitions reach the view,
//! so a slow response for a superseded key cannot overwrite a newer one.
//!
//! Network work happens only in the browser (`hydrate`); on the server the
//! handle stays `Idle` and the page renders its loading shell.

#[cfg(test)]
#[path = "resource_test.rs"]
mod resource_test;

use std::future::Future;
use std::sync::Arc;

use leptos::prelude::*;

use crate::net::cache::{CacheEntry, FetchStatus, Fetcher, ResourceCache, Subscription};
use crate::net::error::FetchError;

/// Reactive accessor returned by `use_resource`.
pub struct ResourceHandle<T: Send + Sync + 'static> {
    state: RwSignal<CacheEntry<T>>,
    revalidate: Callback<()>,
}

impl<T: Send + Sync + 'static> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ResourceHandle<T> {}

impl<T: Send + Sync + 'static> ResourceHandle<T> {
    pub fn data(&self) -> Option<Arc<T>> {
        self.state.with(|entry| entry.data.clone())
    }

    pub fn error(&self) -> Option<FetchError> {
        self.state.with(|entry| entry.error.clone())
    }

    /// Nothing to show yet for a bound key: first request pending or in flight.
    pub fn is_loading(&self) -> bool {
        self.state.with(|entry| {
            let pending = entry.status == FetchStatus::Idle && !entry.key.is_empty();
            entry.data.is_none() && (pending || entry.is_loading())
        })
    }

    /// Any request in flight, including background refreshes.
    pub fn is_validating(&self) -> bool {
        self.state.with(CacheEntry::is_loading)
    }

    /// Force a fresh request for the current key.
    pub fn revalidate(&self) {
        self.revalidate.run(());
    }
}

/// Signal-side state of the hook: which key is bound and its live subscription.
struct Binding<T: Send + Sync + 'static> {
    cache: ResourceCache<T>,
    state: RwSignal<CacheEntry<T>>,
    subscription: StoredValue<Option<Subscription>>,
}

impl<T: Send + Sync + 'static> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            state: self.state,
            subscription: self.subscription,
        }
    }
}

impl<T: Send + Sync + 'static> Binding<T> {
    fn new(cache: ResourceCache<T>) -> Self {
        Self {
            cache,
            state: RwSignal::new(CacheEntry::idle("")),
            subscription: StoredValue::new(None),
        }
    }

    /// Point the view at `key`, dropping the previous key's subscription.
    ///
    /// Returns the key to load, if any.
    fn bind(&self, key: Option<String>) -> Option<String> {
        let Some(key) = key else {
            self.subscription.set_value(None);
            self.state.set(CacheEntry::idle(""));
            return None;
        };
        let state = self.state;
        let sub = self.cache.subscribe(&key, move |entry| state.set(entry.clone()));
        self.subscription.set_value(Some(sub));
        self.state.set(self.cache.entry(&key));
        Some(key)
    }

    fn current_key(&self) -> Option<String> {
        self.state
            .with_untracked(|entry| (!entry.key.is_empty()).then(|| entry.key.clone()))
    }

    fn release(&self) {
        let _ = self.subscription.try_set_value(None);
    }
}

/// Subscribe a component to `cache[key()]`.
///
/// `key` returning `None` suspends fetching (e.g. while logged out).
pub fn use_resource<T, F, K>(cache: ResourceCache<T>, fetcher: F, key: K) -> ResourceHandle<T>
where
    T: Send + Sync + 'static,
    F: Fetcher<T> + Clone + Send + Sync + 'static,
    K: Fn() -> Option<String> + 'static,
{
    let binding = Binding::new(cache);

    let effect_binding = binding.clone();
    let effect_fetcher = fetcher.clone();
    Effect::new(move || {
        if let Some(key) = effect_binding.bind(key()) {
            spawn_task(load_task(effect_binding.cache.clone(), effect_fetcher.clone(), key, false));
        }
    });

    let cleanup_binding = binding.clone();
    on_cleanup(move || cleanup_binding.release());

    let revalidate_binding = binding.clone();
    let revalidate = Callback::new(move |()| {
        if let Some(key) = revalidate_binding.current_key() {
            spawn_task(load_task(revalidate_binding.cache.clone(), fetcher.clone(), key, true));
        }
    });

    ResourceHandle {
        state: binding.state,
        revalidate,
    }
}

/// Read-through (`force = false`) or forced load of `key`; results reach the
/// view through the binding's subscription.
fn load_task<T, F>(cache: ResourceCache<T>, fetcher: F, key: String, force: bool) -> impl Future<Output = ()> + 'static
where
    T: Send + Sync + 'static,
    F: Fetcher<T> + 'static,
{
    async move {
        if force {
            cache.revalidate(&key, &fetcher).await;
        } else {
            cache.load(&key, &fetcher).await;
        }
    }
}

fn spawn_task(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(task);
    #[cfg(not(feature = "hydrate"))]
    let _ = task;
}
