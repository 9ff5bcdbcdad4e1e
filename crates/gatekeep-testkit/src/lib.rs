//! # Gatekeep Testkit
//!
//! Testing utilities for Gatekeep.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known crypt tokens and permission bytes
//! - **Generators**: Proptest strategies for secrets, salts and grant sets
//! - **Fixtures**: A verifier wired to a hasher that counts its invocations
//!
//! ## Golden Vectors
//!
//! ```rust
//! use gatekeep_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, got) in verify_all_vectors() {
//!     assert!(ok, "{}: {}", name, got);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use gatekeep_testkit::generators::{token_from_params, CredentialParams};
//!
//! proptest! {
//!     #[test]
//!     fn token_is_deterministic(params: CredentialParams) {
//!         prop_assert_eq!(token_from_params(&params), token_from_params(&params));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use gatekeep_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let token = fixture.enroll(b"pw");
//! assert!(fixture.verifier.verify(b"pw", token.as_bytes()));
//! assert!(fixture.verifier.verify(b"pw", token.as_bytes()));
//! assert_eq!(fixture.hash_calls(), 2); // enroll + first check
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{enrolled_users, CountingHasher, TestFixture};
pub use generators::{token_from_params, CredentialParams};
pub use vectors::{
    all_vectors, encode_vector, named_set, permission_vectors, verify_all_vectors, CryptVector,
    PermissionVector,
};
