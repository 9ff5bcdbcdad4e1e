//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gatekeep::{CredentialVerifier, VerifierConfig};
use gatekeep_core::{CryptHasher, CryptToken, Result, Sha512Crypt};

/// A hasher that counts how often the primitive runs.
///
/// Shows whether a check was answered from the cache.
#[derive(Debug, Default)]
pub struct CountingHasher {
    inner: Sha512Crypt,
    calls: AtomicUsize,
}

impl CountingHasher {
    /// Wrap the default SHA-512 crypt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a specific hasher configuration.
    pub fn wrapping(inner: Sha512Crypt) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

impl CryptHasher for CountingHasher {
    fn crypt(&self, secret: &[u8], existing: Option<&str>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.crypt(secret, existing)
    }
}

/// A verifier plus a handle on its counting hasher.
pub struct TestFixture {
    pub verifier: CredentialVerifier<Arc<CountingHasher>>,
    pub hasher: Arc<CountingHasher>,
}

impl TestFixture {
    /// Default configuration, minimum rounds so tests stay fast.
    pub fn new() -> Self {
        Self::with_config(VerifierConfig::default())
    }

    /// Use a specific configuration.
    ///
    /// # Panics
    ///
    /// If the configuration is invalid, or enables the janitor outside a
    /// tokio runtime.
    pub fn with_config(config: VerifierConfig) -> Self {
        let hasher = Arc::new(CountingHasher::wrapping(Sha512Crypt::new().with_rounds(1000)));
        let verifier = CredentialVerifier::with_hasher(Arc::clone(&hasher), config)
            .expect("test fixture configuration");
        Self { verifier, hasher }
    }

    /// Create a stored token for `secret`.
    pub fn enroll(&self, secret: &[u8]) -> CryptToken {
        self.verifier
            .create_credential(secret)
            .expect("credential creation")
    }

    /// Primitive invocations so far.
    pub fn hash_calls(&self) -> usize {
        self.hasher.calls()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Enroll `count` users named `user-<i>` with password `password-<i>`.
pub fn enrolled_users(fixture: &TestFixture, count: usize) -> Vec<(String, String, CryptToken)> {
    (0..count)
        .map(|i| {
            let user = format!("user-{}", i);
            let password = format!("password-{}", i);
            let token = fixture.enroll(password.as_bytes());
            (user, password, token)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_counting_hasher_counts() {
        let hasher = CountingHasher::new();
        let token = hasher.crypt(b"pw", None).unwrap();
        hasher.crypt(b"pw", Some(&token)).unwrap();
        assert_eq!(hasher.calls(), 2);

        hasher.reset();
        assert_eq!(hasher.calls(), 0);
    }

    #[test]
    fn test_fixture_hit_skips_hash() {
        let fixture = TestFixture::new();
        let token = fixture.enroll(b"pw");
        assert_eq!(fixture.hash_calls(), 1);

        for _ in 0..5 {
            assert!(fixture.verifier.verify(b"pw", token.as_bytes()));
        }
        assert_eq!(fixture.hash_calls(), 2);
    }

    #[test]
    fn test_failed_checks_always_hash() {
        let fixture = TestFixture::new();
        let token = fixture.enroll(b"pw");
        fixture.hasher.reset();

        for _ in 0..3 {
            assert!(!fixture.verifier.verify(b"nope", token.as_bytes()));
        }
        assert_eq!(fixture.hash_calls(), 3);
    }

    #[test]
    fn test_enrolled_users_distinct() {
        let fixture = TestFixture::new();
        let users = enrolled_users(&fixture, 4);
        assert_eq!(users.len(), 4);

        for (i, (_, password, token)) in users.iter().enumerate() {
            assert!(fixture.verifier.verify(password.as_bytes(), token.as_bytes()));
            let (_, _, other) = &users[(i + 1) % users.len()];
            assert!(!fixture.verifier.verify(password.as_bytes(), other.as_bytes()));
        }
        assert_eq!(fixture.verifier.cache_size(), 4);
    }

    #[tokio::test]
    async fn test_fixture_with_janitor() {
        let config = VerifierConfig::default().with_janitor_interval(Duration::from_millis(10));
        let mut fixture = TestFixture::with_config(config);
        let token = fixture.enroll(b"pw");
        assert!(fixture.verifier.verify(b"pw", token.as_bytes()));

        fixture.verifier.shutdown();
        assert_eq!(fixture.verifier.cache_size(), 0);
    }
}
