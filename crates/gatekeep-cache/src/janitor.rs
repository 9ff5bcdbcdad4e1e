//! Background sweeping of expired entries.
//!
//! Expired entries are already invisible to readers; the janitor only
//! reclaims their memory when nobody reads them again. It holds a weak
//! reference, so it never keeps a cache alive, and stops on its own once the
//! cache is dropped.

use std::hash::Hash;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::access::AccessCache;
use crate::error::{CacheError, Result};

/// Handle to a running janitor task.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct Janitor {
    task: Option<JoinHandle<()>>,
}

impl Janitor {
    /// Spawn a janitor that calls [`AccessCache::cleanup`] every `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<K, V>(cache: &Arc<AccessCache<K, V>>, period: Duration) -> Result<Self>
    where
        K: Eq + Hash + Clone + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let handle = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
        let weak: Weak<AccessCache<K, V>> = Arc::downgrade(cache);

        let task = handle.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = weak.upgrade() else {
                    debug!("cache dropped, janitor exiting");
                    break;
                };
                let removed = cache.cleanup();
                if removed > 0 {
                    debug!(removed, remaining = cache.len(), "janitor swept cache");
                }
            }
        });

        Ok(Self { task: Some(task) })
    }

    /// Whether the task is still running.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    /// Stop the task.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Janitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::CacheBounds;

    #[test]
    fn test_spawn_requires_runtime() {
        let cache = Arc::new(AccessCache::<u8, u8>::default());
        let err = Janitor::spawn(&cache, Duration::from_millis(10)).unwrap_err();
        assert!(matches!(err, CacheError::NoRuntime));
    }

    #[tokio::test]
    async fn test_janitor_sweeps_expired() {
        let cache = Arc::new(AccessCache::<u8, u8>::new(CacheBounds::new(
            8,
            Duration::from_millis(20),
        )));
        cache.insert(1, 1);
        cache.insert(2, 2);

        let janitor = Janitor::spawn(&cache, Duration::from_millis(10)).unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.len(), 0);
        assert!(janitor.is_running());
    }

    #[tokio::test]
    async fn test_janitor_shutdown() {
        let cache = Arc::new(AccessCache::<u8, u8>::default());
        let mut janitor = Janitor::spawn(&cache, Duration::from_millis(10)).unwrap();

        janitor.shutdown();
        assert!(!janitor.is_running());
    }

    #[tokio::test]
    async fn test_janitor_exits_when_cache_dropped() {
        let cache = Arc::new(AccessCache::<u8, u8>::default());
        let janitor = Janitor::spawn(&cache, Duration::from_millis(5)).unwrap();

        drop(cache);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!janitor.is_running());
    }
}
