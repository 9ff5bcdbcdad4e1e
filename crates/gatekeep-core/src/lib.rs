//! # Gatekeep Core
//!
//! Pure primitives for credential verification: the salted crypt hash, token
//! types, constant-time comparison, and cache key derivation.
//!
//! This crate contains no I/O and no shared state.
//!
//! ## Key Types
//!
//! - [`CryptHasher`] - The salted one-way hash seam
//! - [`Sha512Crypt`] - `$6$` SHA-512 crypt, the default hasher
//! - [`CryptToken`] - A stored credential token
//! - [`CredentialKey`] - Cache key for a `(secret, token)` pair
//!
//! ## Comparison
//!
//! Token comparisons must use [`ct_eq`]. See the [`ct`] module.

pub mod canonical;
pub mod crypto;
pub mod ct;
pub mod error;
pub mod types;

pub use canonical::{canonical_pair_bytes, derive_credential_key};
pub use crypto::{random_salt, CryptAlgorithm, CryptHasher, Sha512Crypt, TokenParams};
pub use ct::ct_eq;
pub use error::{CryptError, Result};
pub use types::{CredentialKey, CryptToken};
