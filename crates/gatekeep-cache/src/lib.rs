//! # Gatekeep Cache
//!
//! A small concurrent cache bounded by entry count and idle time, used to
//! remember recent successful credential checks.
//!
//! ## Key Types
//!
//! - [`AccessCache`] - The cache itself (sharded, lock-per-shard)
//! - [`CacheBounds`] - Entry-count and idle-time limits
//! - [`Janitor`] - Optional tokio task that sweeps expired entries
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use gatekeep_cache::{AccessCache, CacheBounds};
//!
//! let cache: AccessCache<String, String> =
//!     AccessCache::new(CacheBounds::new(64, Duration::from_secs(60)));
//!
//! cache.insert("key".to_string(), "value".to_string());
//! assert_eq!(cache.get(&"key".to_string()).as_deref(), Some("value"));
//!
//! cache.invalidate_all();
//! assert_eq!(cache.cleanup(), 0);
//! ```
//!
//! ## Design Notes
//!
//! - **No global lock**: keys hash to independent shards
//! - **Reads refresh**: a hit resets the entry's idle clock
//! - **Lazy expiry**: expired entries read as absent even before cleanup

pub mod access;
pub mod bounds;
pub mod error;
pub mod janitor;

pub use access::AccessCache;
pub use bounds::CacheBounds;
pub use error::{CacheError, Result};
pub use janitor::Janitor;
