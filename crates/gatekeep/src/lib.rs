//! # Gatekeep
//!
//! Password verification and permission encoding for a user database.
//!
//! ## Overview
//!
//! - **Credentials**: passwords are stored as salted SHA-512 crypt tokens
//!   (`$6$...`). [`CredentialVerifier`] checks a presented password against
//!   a stored token and remembers recent successful checks so repeated
//!   logins skip the slow hash.
//! - **Permissions**: system, table and namespace grants are stored as one
//!   byte per granted permission. See [`perms`].
//! - **Authorizations**: visibility labels have a versioned text encoding.
//!
//! ## Usage
//!
//! ```rust
//! use gatekeep::{CredentialVerifier, VerifierConfig};
//!
//! let verifier = CredentialVerifier::new(VerifierConfig::default()).unwrap();
//! let token = verifier.create_credential(b"correct horse").unwrap();
//!
//! assert!(verifier.verify(b"correct horse", token.as_bytes()));
//! assert!(!verifier.verify(b"battery staple", token.as_bytes()));
//! ```
//!
//! ## Re-exports
//!
//! - `gatekeep::core` - Crypt primitive, tokens, constant-time comparison
//! - `gatekeep::cache` - Bounded idle-expiring cache
//! - `gatekeep::perms` - Permission enumerations and byte codecs

pub mod config;
pub mod error;
pub mod verifier;

// Re-export component crates
pub use gatekeep_cache as cache;
pub use gatekeep_core as core;
pub use gatekeep_perms as perms;

// Re-export main types for convenience
pub use config::VerifierConfig;
pub use error::{GatekeepError, Result};
pub use verifier::CredentialVerifier;

pub use gatekeep_core::{CryptHasher, CryptToken, Sha512Crypt};
pub use gatekeep_perms::{
    decode_authorizations, decode_namespace_permissions, decode_system_permissions,
    decode_table_permissions, encode_authorizations, encode_namespace_permissions,
    encode_system_permissions, encode_table_permissions, Authorizations, NamespacePermission,
    NamespacePermissionSet, Permission, PermissionKind, SystemPermission, SystemPermissionSet,
    TablePermission, TablePermissionSet,
};
