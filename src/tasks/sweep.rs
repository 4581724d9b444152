//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlCache;

/// Spawns a task that sweeps `cache` every `interval`.
///
/// The task loops forever; abort the returned handle to stop it. It takes
/// the write lock only for the duration of each sweep.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(TtlCache::<String>::default()));
/// let handle = spawn_sweep_task(cache.clone(), Duration::from_secs(300));
/// // On teardown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task<T>(cache: Arc<RwLock<TtlCache<T>>>, interval: Duration) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
{
    // A zero period would spin the loop
    let interval = interval.max(Duration::from_millis(1));

    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting TTL sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut guard = cache.write().await;
                guard.sweep_expired()
            };

            if removed > 0 {
                info!(removed, "TTL sweep removed expired entries");
            } else {
                debug!("TTL sweep found no expired entries");
            }
        }
    })
}
