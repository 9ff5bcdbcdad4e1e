//! Canonical encoding of verification cache keys.
//!
//! A cache key must identify exactly one `(secret, stored token)` pair.
//! Plain concatenation does not: `("ab", "c")` and `("a", "bc")` collide. The
//! pair is therefore encoded with explicit lengths:
//!
//! ```text
//! u64_be(len(secret)) || secret || u64_be(len(token)) || token
//! ```
//!
//! and the encoding is hashed with a keyed BLAKE3 so the cache never holds the
//! plaintext secret.

use blake3::Hasher;

use crate::types::CredentialKey;

/// Domain separator mixed into every cache key.
pub const KEY_DOMAIN: &[u8] = b"gatekeep-v0-credential-cache";

/// Length-prefixed encoding of a `(secret, token)` pair.
pub fn canonical_pair_bytes(secret: &[u8], token: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16 + secret.len() + token.len());
    buf.extend_from_slice(&(secret.len() as u64).to_be_bytes());
    buf.extend_from_slice(secret);
    buf.extend_from_slice(&(token.len() as u64).to_be_bytes());
    buf.extend_from_slice(token);
    buf
}

/// Derive the cache key for a `(secret, token)` pair.
///
/// `key_secret` is a per-cache random key; two caches derive unrelated keys
/// for the same pair.
pub fn derive_credential_key(key_secret: &[u8; 32], secret: &[u8], token: &[u8]) -> CredentialKey {
    let mut hasher = Hasher::new_keyed(key_secret);
    hasher.update(KEY_DOMAIN);
    hasher.update(&canonical_pair_bytes(secret, token));
    CredentialKey(*hasher.finalize().as_bytes())
}
