//! Strong type definitions for the Gatekeep Core.
//!
//! Tokens and cache keys are newtypes so a plaintext secret can never be
//! passed where a stored credential is expected.

use std::fmt;

use crate::error::{CryptError, Result};

/// A salted crypt token, e.g. `$6$saltsalt$digest...`.
///
/// These are the literal bytes written to the credential store. The token is
/// opaque to everything except the hash primitive.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CryptToken(String);

impl CryptToken {
    /// Wrap a token string produced by the hash primitive.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Interpret stored bytes as a token.
    ///
    /// Only the encoding is checked here; structure is the primitive's job.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let s = std::str::from_utf8(bytes)?;
        Ok(Self(s.to_owned()))
    }

    /// Get the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the raw bytes, as stored.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consume into the stored byte representation.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }
}

// Never print the digest.
impl fmt::Debug for CryptToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.0.rsplit_once('$').map(|(h, _)| h).unwrap_or("");
        write!(f, "CryptToken({}$...)", header)
    }
}

impl AsRef<[u8]> for CryptToken {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl TryFrom<&[u8]> for CryptToken {
    type Error = CryptError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl From<CryptToken> for Vec<u8> {
    fn from(token: CryptToken) -> Self {
        token.into_bytes()
    }
}

/// A 32-byte verification cache key.
///
/// Derived from a `(secret, stored token)` pair, see
/// [`crate::canonical::derive_credential_key`]. Holds no plaintext.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialKey(pub [u8; 32]);

impl CredentialKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialKey({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}
