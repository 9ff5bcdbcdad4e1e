//! Byte encoding of permission sets.
//!
//! A set of grants is stored as one byte per grant, the grant's id. Encoders
//! emit ids in ascending order, so the same set always produces the same
//! bytes. Decoders accept any order and ignore repeats.
//!
//! The three kinds do not handle corruption the same way:
//!
//! - **System**: an unknown byte means the stored record is corrupt. The
//!   whole set is discarded and an empty set returned, so the user simply
//!   holds no system permissions until the record is repaired.
//! - **Table / Namespace**: an unknown byte is returned as
//!   [`PermsError::UnknownPermission`]. Callers see the failure instead of a
//!   partial set.

use std::collections::BTreeSet;

use tracing::error;

use crate::error::Result;
use crate::permission::{NamespacePermission, Permission, SystemPermission, TablePermission};

/// A set of grants of one kind.
pub type PermissionSet<P> = BTreeSet<P>;

/// System permission set.
pub type SystemPermissionSet = PermissionSet<SystemPermission>;

/// Table permission set.
pub type TablePermissionSet = PermissionSet<TablePermission>;

/// Namespace permission set.
pub type NamespacePermissionSet = PermissionSet<NamespacePermission>;

/// Encode grants as one id byte each, ascending, without repeats.
pub fn encode_permissions<'a, P, I>(permissions: I) -> Vec<u8>
where
    P: Permission,
    I: IntoIterator<Item = &'a P>,
{
    let ids: BTreeSet<u8> = permissions.into_iter().map(|p| p.id()).collect();
    ids.into_iter().collect()
}

/// Decode id bytes, failing on the first byte that names no grant.
pub fn decode_permissions<P: Permission>(bytes: &[u8]) -> Result<PermissionSet<P>> {
    bytes.iter().map(|&id| P::resolve(id)).collect()
}

/// Encode a user's system permissions.
pub fn encode_system_permissions<'a, I>(permissions: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a SystemPermission>,
{
    encode_permissions(permissions)
}

/// Decode a user's system permissions.
///
/// Never fails: a corrupt record decodes to the empty set and is logged.
pub fn decode_system_permissions(bytes: &[u8]) -> SystemPermissionSet {
    match decode_permissions(bytes) {
        Ok(set) => set,
        Err(e) => {
            error!(
                error = %e,
                len = bytes.len(),
                "user database is corrupt; error converting system permissions"
            );
            SystemPermissionSet::new()
        }
    }
}

/// Encode a user's permissions on one table.
pub fn encode_table_permissions<'a, I>(permissions: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a TablePermission>,
{
    encode_permissions(permissions)
}

/// Decode a user's permissions on one table.
pub fn decode_table_permissions(bytes: &[u8]) -> Result<TablePermissionSet> {
    decode_permissions(bytes)
}

/// Encode a user's permissions on one namespace.
pub fn encode_namespace_permissions<'a, I>(permissions: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a NamespacePermission>,
{
    encode_permissions(permissions)
}

/// Decode a user's permissions on one namespace.
pub fn decode_namespace_permissions(bytes: &[u8]) -> Result<NamespacePermissionSet> {
    decode_permissions(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PermsError;
    use crate::permission::PermissionKind;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn subset<P: Permission>() -> impl Strategy<Value = Vec<P>> {
        prop::sample::subsequence(P::ALL.to_vec(), 0..=P::ALL.len())
    }

    proptest! {
        #[test]
        fn test_system_roundtrip(mut perms in subset::<SystemPermission>()) {
            let expected: SystemPermissionSet = perms.iter().copied().collect();
            perms.reverse();
            let bytes = encode_system_permissions(&perms);
            prop_assert_eq!(bytes.len(), expected.len());
            prop_assert_eq!(decode_system_permissions(&bytes), expected);
        }

        #[test]
        fn test_table_roundtrip(perms in subset::<TablePermission>()) {
            let set: HashSet<TablePermission> = perms.into_iter().collect();
            let bytes = encode_table_permissions(&set);
            let decoded = decode_table_permissions(&bytes).unwrap();
            prop_assert_eq!(decoded.into_iter().collect::<HashSet<_>>(), set);
        }

        #[test]
        fn test_namespace_roundtrip(perms in subset::<NamespacePermission>()) {
            let set: NamespacePermissionSet = perms.into_iter().collect();
            let bytes = encode_namespace_permissions(&set);
            prop_assert_eq!(decode_namespace_permissions(&bytes).unwrap(), set);
        }

        #[test]
        fn test_decode_order_independent(perms in subset::<NamespacePermission>()) {
            let forward: Vec<u8> = perms.iter().map(|p| p.id()).collect();
            let backward: Vec<u8> = forward.iter().rev().copied().collect();
            prop_assert_eq!(
                decode_namespace_permissions(&forward).unwrap(),
                decode_namespace_permissions(&backward).unwrap()
            );
        }
    }

    #[test]
    fn test_encode_is_sorted_and_deduplicated() {
        let perms = [
            SystemPermission::System,
            SystemPermission::Grant,
            SystemPermission::CreateUser,
            SystemPermission::Grant,
        ];
        assert_eq!(encode_system_permissions(&perms), vec![0, 4, 7]);
    }

    #[test]
    fn test_empty_set() {
        let empty: Vec<TablePermission> = Vec::new();
        assert!(encode_table_permissions(&empty).is_empty());
        assert!(decode_table_permissions(&[]).unwrap().is_empty());
        assert!(decode_system_permissions(&[]).is_empty());
        assert!(decode_namespace_permissions(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_full_sets() {
        let all: TablePermissionSet = TablePermission::ALL.iter().copied().collect();
        assert_eq!(encode_table_permissions(&all), vec![2, 3, 4, 5, 6, 7, 8]);

        let all: SystemPermissionSet = SystemPermission::ALL.iter().copied().collect();
        assert_eq!(encode_system_permissions(&all), (0..=11).collect::<Vec<u8>>());
    }

    #[test]
    fn test_repeated_bytes_collapse() {
        let set = decode_table_permissions(&[2, 2, 3]).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_corrupt_system_permissions_decode_empty() {
        // Valid ids around an unknown one: nothing survives.
        assert!(decode_system_permissions(&[0, 1, 42, 7]).is_empty());
        assert!(decode_system_permissions(&[0xff]).is_empty());
    }

    #[test]
    fn test_corrupt_table_permissions_fail() {
        let err = decode_table_permissions(&[2, 0, 3]).unwrap_err();
        assert!(matches!(
            err,
            PermsError::UnknownPermission { kind: PermissionKind::Table, id: 0 }
        ));
    }

    #[test]
    fn test_corrupt_namespace_permissions_fail() {
        let err = decode_namespace_permissions(&[0, 1, 9]).unwrap_err();
        assert!(matches!(
            err,
            PermsError::UnknownPermission { kind: PermissionKind::Namespace, id: 9 }
        ));
    }
}
