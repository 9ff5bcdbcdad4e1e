//! A bounded, idle-expiring concurrent cache.
//!
//! Entries live in a sharded [`DashMap`], so operations on unrelated keys do
//! not contend on a common lock. Each entry records when it was last touched;
//! reads update that timestamp through an atomic while holding only the
//! shard's read lock.
//!
//! Eviction happens three ways:
//!
//! - **Idle**: an entry untouched for `idle_timeout` is treated as absent on
//!   read and removed by [`AccessCache::cleanup`].
//! - **Capacity**: inserting past `max_entries` evicts the least recently
//!   touched entries.
//! - **Explicit**: [`AccessCache::invalidate`], [`AccessCache::invalidate_if`]
//!   and [`AccessCache::invalidate_all`].

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use dashmap::DashMap;
use tracing::trace;

use crate::bounds::CacheBounds;

struct Slot<V> {
    value: V,
    /// Nanoseconds since the cache epoch.
    last_access: AtomicU64,
}

impl<V> Slot<V> {
    fn new(value: V, now: u64) -> Self {
        Self {
            value,
            last_access: AtomicU64::new(now),
        }
    }

    fn touch(&self, now: u64) {
        self.last_access.fetch_max(now, Ordering::Relaxed);
    }

    fn last_access(&self) -> u64 {
        self.last_access.load(Ordering::Relaxed)
    }
}

enum Lookup<V> {
    Hit(V),
    Expired,
    Miss,
}

/// A concurrent cache bounded by entry count and idle time.
pub struct AccessCache<K, V> {
    entries: DashMap<K, Slot<V>>,
    bounds: CacheBounds,
    idle_nanos: u64,
    epoch: Instant,
}

impl<K, V> AccessCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty cache with the given bounds.
    pub fn new(bounds: CacheBounds) -> Self {
        Self {
            entries: DashMap::with_capacity(bounds.initial_capacity),
            idle_nanos: u64::try_from(bounds.idle_timeout.as_nanos()).unwrap_or(u64::MAX),
            bounds,
            epoch: Instant::now(),
        }
    }

    /// The bounds this cache enforces.
    pub fn bounds(&self) -> &CacheBounds {
        &self.bounds
    }

    /// Get a live entry, refreshing its access time.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.now();

        // The shard guard must be released before removing.
        let lookup = match self.entries.get(key) {
            Some(slot) if self.is_expired(&slot, now) => Lookup::Expired,
            Some(slot) => {
                slot.touch(now);
                Lookup::Hit(slot.value.clone())
            }
            None => Lookup::Miss,
        };

        match lookup {
            Lookup::Hit(value) => Some(value),
            Lookup::Expired => {
                self.entries
                    .remove_if(key, |_, slot| self.is_expired(slot, now));
                None
            }
            Lookup::Miss => None,
        }
    }

    /// Whether a live entry exists, without refreshing it.
    pub fn contains(&self, key: &K) -> bool {
        let now = self.now();
        self.entries
            .get(key)
            .map(|slot| !self.is_expired(&slot, now))
            .unwrap_or(false)
    }

    /// Insert or replace an entry, then enforce the entry bound.
    pub fn insert(&self, key: K, value: V) {
        let now = self.now();
        self.entries.insert(key, Slot::new(value, now));
        self.enforce_capacity();
    }

    /// Remove an entry. Returns whether one was present.
    pub fn invalidate(&self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Remove an entry only if its current value satisfies `predicate`.
    ///
    /// The check and removal are atomic with respect to other writers of the
    /// same key, so a value replaced concurrently is left alone.
    pub fn invalidate_if(&self, key: &K, predicate: impl FnOnce(&V) -> bool) -> bool {
        self.entries
            .remove_if(key, |_, slot| predicate(&slot.value))
            .is_some()
    }

    /// Remove every entry.
    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    /// Drop expired entries and enforce the entry bound.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&self) -> usize {
        let now = self.now();
        let before = self.entries.len();
        self.entries.retain(|_, slot| !self.is_expired(slot, now));
        let expired = before.saturating_sub(self.entries.len());
        let evicted = self.enforce_capacity();
        if expired + evicted > 0 {
            trace!(expired, evicted, "cache cleanup");
        }
        expired + evicted
    }

    /// Number of stored entries, possibly including expired ones.
    ///
    /// Call [`AccessCache::cleanup`] first for an exact live count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict least recently touched entries until within bounds.
    fn enforce_capacity(&self) -> usize {
        let mut evicted = 0;
        while self.entries.len() > self.bounds.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().last_access())
                .map(|entry| entry.key().clone());

            match oldest {
                Some(key) => {
                    if self.entries.remove(&key).is_some() {
                        evicted += 1;
                    }
                }
                None => break,
            }
        }
        evicted
    }

    fn is_expired(&self, slot: &Slot<V>, now: u64) -> bool {
        now.saturating_sub(slot.last_access()) >= self.idle_nanos
    }

    fn now(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

impl<K, V> Default for AccessCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new(CacheBounds::default())
    }
}
