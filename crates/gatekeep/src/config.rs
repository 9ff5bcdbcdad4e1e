//! Verifier configuration.

use std::time::Duration;

use gatekeep_cache::CacheBounds;
use serde::{Deserialize, Serialize};

use crate::error::{GatekeepError, Result};

/// Configuration for a [`CredentialVerifier`](crate::CredentialVerifier).
///
/// Missing fields in a parsed document take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Maximum number of cached successful checks.
    pub max_entries: usize,
    /// Cache slots allocated up front.
    pub initial_capacity: usize,
    /// A cached check unused for this long is dropped (milliseconds).
    pub idle_timeout_ms: u64,
    /// Period of the background sweep (milliseconds). `None` disables it.
    pub janitor_interval_ms: Option<u64>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_entries: 64,
            initial_capacity: 4,
            idle_timeout_ms: 60_000,
            janitor_interval_ms: None,
        }
    }
}

impl VerifierConfig {
    /// Parse from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the entry bound.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self.initial_capacity = self.initial_capacity.min(max_entries);
        self
    }

    /// Set the idle timeout.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout_ms = duration_ms(idle_timeout);
        self
    }

    /// Enable the background sweep.
    pub fn with_janitor_interval(mut self, interval: Duration) -> Self {
        self.janitor_interval_ms = Some(duration_ms(interval));
        self
    }

    /// Cache bounds described by this configuration.
    pub fn bounds(&self) -> CacheBounds {
        CacheBounds::new(self.max_entries, Duration::from_millis(self.idle_timeout_ms))
            .with_initial_capacity(self.initial_capacity)
    }

    /// Janitor period, if enabled.
    pub fn janitor_interval(&self) -> Option<Duration> {
        self.janitor_interval_ms.map(Duration::from_millis)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        self.bounds().validate()?;
        if self.janitor_interval_ms == Some(0) {
            return Err(GatekeepError::InvalidConfig(
                "janitor_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
