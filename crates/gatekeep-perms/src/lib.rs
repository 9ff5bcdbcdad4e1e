//! # Gatekeep Permissions
//!
//! Permission grants and their stored byte form.
//!
//! ## Overview
//!
//! A user's grants are kept in the coordination service as compact byte
//! strings. This crate defines the grant enumerations and converts sets of
//! grants to and from those bytes.
//!
//! ## Key Concepts
//!
//! - **System permission**: a grant over the whole system (create users, etc.)
//! - **Table permission**: a grant on one table (read, write, ...)
//! - **Namespace permission**: a grant on a namespace and its tables
//! - **Authorizations**: labels controlling which data a user may scan
//!
//! ## Stored Form
//!
//! One byte per grant, the grant's id. See [`codec`] for how each kind treats
//! unknown ids.
//!
//! ## Usage
//!
//! ```rust
//! use gatekeep_perms::{
//!     decode_table_permissions, encode_table_permissions, TablePermission,
//!     TablePermissionSet,
//! };
//!
//! let grants: TablePermissionSet =
//!     [TablePermission::Read, TablePermission::Write].into_iter().collect();
//!
//! let bytes = encode_table_permissions(&grants);
//! assert_eq!(bytes, vec![2, 3]);
//!
//! let decoded = decode_table_permissions(&bytes).unwrap();
//! assert_eq!(decoded, grants);
//! ```

pub mod authorizations;
pub mod codec;
pub mod error;
pub mod permission;

pub use authorizations::{decode_authorizations, encode_authorizations, Authorizations};
pub use codec::{
    decode_namespace_permissions, decode_permissions, decode_system_permissions,
    decode_table_permissions, encode_namespace_permissions, encode_permissions,
    encode_system_permissions, encode_table_permissions, NamespacePermissionSet, PermissionSet,
    SystemPermissionSet, TablePermissionSet,
};
pub use error::{PermsError, Result};
pub use permission::{
    NamespacePermission, Permission, PermissionKind, SystemPermission, TablePermission,
};
