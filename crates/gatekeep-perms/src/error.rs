//! Error types for the permissions module.

use thiserror::Error;

use crate::permission::PermissionKind;

/// Errors that can occur during permission encoding and decoding.
#[derive(Debug, Error)]
pub enum PermsError {
    /// A stored byte does not name any permission of this kind.
    #[error("unknown {kind} permission id: {id}")]
    UnknownPermission {
        /// Which enumeration was being decoded.
        kind: PermissionKind,
        /// The unresolvable byte.
        id: u8,
    },

    /// A permission name does not match any variant.
    #[error("unknown {kind} permission name: {name}")]
    UnknownPermissionName {
        /// Which enumeration was being parsed.
        kind: PermissionKind,
        /// The unrecognized name.
        name: String,
    },

    /// Stored authorizations are malformed.
    #[error("invalid authorizations: {0}")]
    InvalidAuthorization(String),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
