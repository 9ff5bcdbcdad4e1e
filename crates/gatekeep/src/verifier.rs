//! Credential verification with a cache of recent successful checks.
//!
//! Hashing a password is deliberately slow. A client that re-authenticates
//! repeatedly with the same password against the same stored token should
//! not pay that cost every time, so each successful check is remembered for a
//! short while, keyed on the `(password, stored token)` pair.
//!
//! Keying on the pair (rather than the password alone) means a stored token
//! that changes out-of-band can never be satisfied by an old cache entry: the
//! new token derives a different key and is checked from scratch.

use std::sync::Arc;

use rand::RngCore;
use tracing::{debug, error, trace};

use gatekeep_cache::{AccessCache, Janitor};
use gatekeep_core::{ct_eq, derive_credential_key, CredentialKey, CryptHasher, CryptToken, Sha512Crypt};

use crate::config::VerifierConfig;
use crate::error::Result;

/// Verifies passwords against stored crypt tokens.
///
/// Each verifier owns its cache; two verifiers never share results. The
/// verifier is `Sync`, so one instance can serve many request threads.
pub struct CredentialVerifier<H: CryptHasher = Sha512Crypt> {
    hasher: H,
    cache: Arc<AccessCache<CredentialKey, String>>,
    /// Keys the cache key derivation; random per verifier.
    key_secret: [u8; 32],
    janitor: Option<Janitor>,
    config: VerifierConfig,
}

impl CredentialVerifier<Sha512Crypt> {
    /// Create a verifier using SHA-512 crypt.
    ///
    /// If the configuration enables the janitor, this must be called from
    /// within a tokio runtime.
    pub fn new(config: VerifierConfig) -> Result<Self> {
        Self::with_hasher(Sha512Crypt::new(), config)
    }
}

impl<H: CryptHasher> CredentialVerifier<H> {
    /// Create a verifier with a specific hash primitive.
    pub fn with_hasher(hasher: H, config: VerifierConfig) -> Result<Self> {
        config.validate()?;

        let cache = Arc::new(AccessCache::new(config.bounds()));
        let janitor = match config.janitor_interval() {
            Some(period) => Some(Janitor::spawn(&cache, period)?),
            None => None,
        };

        let mut key_secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key_secret);

        debug!(
            max_entries = config.max_entries,
            idle_timeout_ms = config.idle_timeout_ms,
            janitor = janitor.is_some(),
            "credential verifier created"
        );

        Ok(Self {
            hasher,
            cache,
            key_secret,
            janitor,
            config,
        })
    }

    /// The configuration this verifier was built with.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// The hash primitive in use.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Create a stored token for a new password.
    ///
    /// Uses a fresh random salt. Nothing is cached.
    pub fn create_credential(&self, secret: &[u8]) -> Result<CryptToken> {
        let token = self.hasher.crypt(secret, None)?;
        Ok(CryptToken::new(token))
    }

    /// Check `secret` against a stored token.
    ///
    /// Returns `false` for a wrong password and also for a stored token that
    /// cannot be parsed; the latter is logged.
    pub fn verify(&self, secret: &[u8], stored: &[u8]) -> bool {
        let key = derive_credential_key(&self.key_secret, secret, stored);

        if let Some(cached) = self.cache.get(&key) {
            if ct_eq(stored, cached.as_bytes()) {
                trace!(%key, "credential cache hit");
                return true;
            }
            // Only remove the value we saw; a concurrent refresh stays.
            debug!(%key, "cached credential does not match stored token; invalidating");
            self.cache.invalidate_if(&key, |current| current == &cached);
        }

        let stored_text = match std::str::from_utf8(stored) {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "unrecognized hash format");
                return false;
            }
        };

        let fresh = match self.hasher.crypt(secret, Some(stored_text)) {
            Ok(token) => token,
            Err(e) if e.is_malformed() => {
                error!(error = %e, "unrecognized hash format");
                return false;
            }
            Err(e) => {
                error!(error = %e, "hash primitive failed during verification");
                return false;
            }
        };

        let matches = ct_eq(stored, fresh.as_bytes());
        if matches {
            self.cache.insert(key, fresh);
        }
        matches
    }

    /// Number of cached checks, after dropping expired ones.
    pub fn cache_size(&self) -> usize {
        self.cache.cleanup();
        self.cache.len()
    }

    /// Forget every cached check, e.g. after a bulk credential rotation.
    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
    }

    /// Stop the janitor and clear the cache.
    pub fn shutdown(&mut self) {
        if let Some(mut janitor) = self.janitor.take() {
            janitor.shutdown();
        }
        self.cache.invalidate_all();
        debug!("credential verifier shut down");
    }
}
