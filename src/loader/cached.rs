//! Cached Loader
//!
//! Serves loader results from a `TtlCache`, calling the loader only on a
//! miss. Owns the background sweep for its cache.

use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{generate_key, CacheConfig, CacheStats, TtlCache};
use crate::error::{KeyError, LoadError};
use crate::loader::FlightGroup;
use crate::tasks::spawn_sweep_task;

// == Preload Summary ==
/// Outcome of a preload batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PreloadSummary {
    /// Params whose value is now cached (fresh load or existing hit)
    pub loaded: usize,
    /// Params whose load failed
    pub failed: usize,
}

// == Cached Loader ==
/// Loader front-end for one cache namespace.
///
/// Every key produced by this loader starts with `prefix`. Dropping the
/// loader stops its sweep task.
#[derive(Debug)]
pub struct CachedLoader<T> {
    prefix: String,
    cache: Arc<RwLock<TtlCache<T>>>,
    flights: FlightGroup,
    single_flight: bool,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<T> CachedLoader<T>
where
    T: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a loader with its own cache and starts the sweep task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(prefix: impl Into<String>, config: &CacheConfig) -> Self {
        let cache = Arc::new(RwLock::new(TtlCache::from_config(config)));
        let sweeper = spawn_sweep_task(cache.clone(), config.sweep_period());

        Self {
            prefix: prefix.into(),
            cache,
            flights: FlightGroup::new(),
            single_flight: config.single_flight,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Shared handle to the underlying cache.
    pub fn cache_handle(&self) -> Arc<RwLock<TtlCache<T>>> {
        self.cache.clone()
    }

    // == Key For ==
    /// Key under which the result for `params` is stored.
    pub fn key_for<P: Serialize>(&self, params: Option<&P>) -> Result<String, KeyError> {
        generate_key(&self.prefix, params)
    }

    // == With Cache ==
    /// Returns the cached value for `params`, loading it on a miss.
    ///
    /// On a hit the loader is not called. On a miss the loader's value is
    /// stored and returned; a loader error is returned as
    /// `LoadError::Loader` and nothing is stored.
    ///
    /// With single-flight enabled, concurrent misses on one key wait for the
    /// first load and then read its result instead of loading again.
    pub async fn with_cache<P, F, Fut, E>(
        &self,
        loader: F,
        params: Option<P>,
    ) -> Result<T, LoadError<E>>
    where
        P: Serialize,
        F: FnOnce(Option<P>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = generate_key(&self.prefix, params.as_ref())?;

        if let Some(value) = self.lookup(&key).await {
            debug!(key = %key, "Cache hit");
            return Ok(value);
        }

        let _flight = if self.single_flight {
            let guard = self.flights.acquire(&key).await;
            // Another caller may have filled the key while we waited
            let filled = self.cache.write().await.peek(&key);
            if let Some(value) = filled {
                debug!(key = %key, "Cache filled by concurrent load");
                return Ok(value);
            }
            Some(guard)
        } else {
            None
        };

        debug!(key = %key, "Cache miss, invoking loader");
        self.load_and_store(key, loader, params).await
    }

    // == Refresh ==
    /// Loads `params` regardless of what is cached and stores the result.
    ///
    /// On failure the previously cached value, if any, is left in place.
    pub async fn refresh<P, F, Fut, E>(&self, loader: F, params: Option<P>) -> Result<T, LoadError<E>>
    where
        P: Serialize,
        F: FnOnce(Option<P>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = generate_key(&self.prefix, params.as_ref())?;

        let _flight = if self.single_flight {
            Some(self.flights.acquire(&key).await)
        } else {
            None
        };

        debug!(key = %key, "Refreshing cached value");
        self.load_and_store(key, loader, params).await
    }

    // == Preload ==
    /// Runs `with_cache` for every entry of `params_list` concurrently.
    ///
    /// Waits for every attempt to settle. Individual failures are logged
    /// and counted, never propagated.
    pub async fn preload<P, F, Fut, E>(&self, loader: F, params_list: Vec<P>) -> PreloadSummary
    where
        P: Serialize,
        F: Fn(Option<P>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let loader = &loader;
        let attempts = params_list
            .into_iter()
            .map(|params| self.with_cache(loader, Some(params)));

        let mut summary = PreloadSummary::default();
        for result in join_all(attempts).await {
            match result {
                Ok(_) => summary.loaded += 1,
                Err(err) => {
                    warn!(prefix = %self.prefix, error = %err, "Preload attempt failed");
                    summary.failed += 1;
                }
            }
        }

        info!(
            prefix = %self.prefix,
            loaded = summary.loaded,
            failed = summary.failed,
            "Preload finished"
        );
        summary
    }

    // == Cached ==
    /// Reads the cached value for `params` without loading.
    pub async fn cached<P: Serialize>(&self, params: Option<&P>) -> Result<Option<T>, KeyError> {
        let key = self.key_for(params)?;
        Ok(self.lookup(&key).await)
    }

    // == Invalidate ==
    /// Drops the cached value for `params`, if any. Returns the key.
    pub async fn invalidate<P: Serialize>(&self, params: Option<&P>) -> Result<String, KeyError> {
        let key = self.key_for(params)?;
        self.cache.write().await.delete(&key);
        debug!(key = %key, "Invalidated cache entry");
        Ok(key)
    }

    pub async fn clear_all(&self) {
        self.cache.write().await.clear_all();
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// True while the background sweep is running.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    // == Close ==
    /// Stops the sweep task and empties the cache.
    pub async fn close(&self) {
        self.stop_sweeper();
        self.clear_all().await;
        info!(prefix = %self.prefix, "Cached loader closed");
    }

    async fn lookup(&self, key: &str) -> Option<T> {
        // Write lock: a stale entry is removed on read
        self.cache.write().await.get(key)
    }

    async fn load_and_store<P, F, Fut, E>(
        &self,
        key: String,
        loader: F,
        params: Option<P>,
    ) -> Result<T, LoadError<E>>
    where
        F: FnOnce(Option<P>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let value = loader(params).await.map_err(LoadError::Loader)?;
        self.cache.write().await.set(key, value.clone());
        Ok(value)
    }

    fn stop_sweeper(&self) {
        let handle = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

impl<T> Drop for CachedLoader<T> {
    fn drop(&mut self) {
        let slot = self.sweeper.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}
