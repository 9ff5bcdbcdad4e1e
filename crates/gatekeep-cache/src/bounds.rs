//! Size and time bounds for an [`AccessCache`](crate::AccessCache).

use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default maximum number of entries.
pub const DEFAULT_MAX_ENTRIES: usize = 64;

/// Default number of slots allocated up front.
pub const DEFAULT_INITIAL_CAPACITY: usize = 4;

/// Default time an entry may go unread before it expires.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Entry-count and idle-time limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBounds {
    /// Maximum number of live entries.
    pub max_entries: usize,
    /// Slots allocated up front.
    pub initial_capacity: usize,
    /// Entries not read or written for this long are expired.
    pub idle_timeout: Duration,
}

impl CacheBounds {
    /// Create bounds with the given limits.
    pub fn new(max_entries: usize, idle_timeout: Duration) -> Self {
        Self {
            max_entries,
            initial_capacity: DEFAULT_INITIAL_CAPACITY.min(max_entries),
            idle_timeout,
        }
    }

    /// Set the initial capacity.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Check that the bounds describe a usable cache.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidBounds(
                "max_entries must be at least 1".to_string(),
            ));
        }
        if self.idle_timeout.is_zero() {
            return Err(CacheError::InvalidBounds(
                "idle_timeout must be non-zero".to_string(),
            ));
        }
        if self.initial_capacity > self.max_entries {
            return Err(CacheError::InvalidBounds(format!(
                "initial_capacity {} exceeds max_entries {}",
                self.initial_capacity, self.max_entries
            )));
        }
        Ok(())
    }
}

impl Default for CacheBounds {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}
