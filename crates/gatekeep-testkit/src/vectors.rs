//! Golden test vectors for deterministic verification.
//!
//! Stored credentials and grants must keep decoding across releases and
//! across implementations. Crypt vectors match glibc `crypt(3)`.

use gatekeep_core::{CryptHasher, Sha512Crypt};
use gatekeep_perms::{
    encode_namespace_permissions, encode_system_permissions, encode_table_permissions,
    NamespacePermission, Permission, PermissionKind, PermissionSet, SystemPermission,
    TablePermission,
};
use serde::Serialize;

/// A golden crypt vector.
#[derive(Debug, Clone, Serialize)]
pub struct CryptVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Password bytes.
    pub secret: &'static [u8],
    /// Setting handed to the hasher, `$6$[rounds=<n>$]<salt>`.
    pub setting: &'static str,
    /// Expected token.
    pub expected: &'static str,
}

/// Get all golden crypt vectors.
pub fn all_vectors() -> Vec<CryptVector> {
    vec![
        CryptVector {
            name: "default rounds",
            secret: b"Hello world!",
            setting: "$6$saltstring",
            expected: "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uBnIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1",
        },
        CryptVector {
            name: "rounds field, salt truncated to 16",
            secret: b"Hello world!",
            setting: "$6$rounds=10000$saltstringsaltstring",
            expected: "$6$rounds=10000$saltstringsaltst$OW1/O6BYHV6BcXZu8QVeXbDWra3Oeqh0sbHbbMCVNSnCM/UrjmM0Dp8vOuZeHBy/YTBmSK6H9qs/y3RnOaw5v.",
        },
        CryptVector {
            name: "sha256 stored token",
            secret: b"Hello world!",
            setting: "$5$saltstring",
            expected: "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5",
        },
    ]
}

/// Compute every crypt vector and report `(name, matches, computed)`.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let hasher = Sha512Crypt::new();
    all_vectors()
        .into_iter()
        .map(|v| {
            let computed = hasher
                .crypt(v.secret, Some(v.setting))
                .unwrap_or_else(|e| format!("error: {}", e));
            let matches = computed == v.expected;
            (v.name.to_string(), matches, computed)
        })
        .collect()
}

/// A golden permission encoding.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionVector {
    pub name: &'static str,
    pub kind: PermissionKind,
    /// Permission names, in any order.
    pub permissions: &'static [&'static str],
    /// Expected stored bytes (hex).
    pub expected: &'static str,
}

/// Get all golden permission vectors.
pub fn permission_vectors() -> Vec<PermissionVector> {
    vec![
        PermissionVector {
            name: "system admin",
            kind: PermissionKind::System,
            permissions: &["SYSTEM", "CREATE_USER", "GRANT"],
            expected: "000407",
        },
        PermissionVector {
            name: "system delegation",
            kind: PermissionKind::System,
            permissions: &["OBTAIN_DELEGATION_TOKEN", "ALTER_NAMESPACE"],
            expected: "0a0b",
        },
        PermissionVector {
            name: "table reader",
            kind: PermissionKind::Table,
            permissions: &["READ", "GET_SUMMARIES"],
            expected: "0208",
        },
        PermissionVector {
            name: "table owner",
            kind: PermissionKind::Table,
            permissions: &["DROP_TABLE", "GRANT", "ALTER_TABLE", "WRITE", "READ"],
            expected: "0203050607",
        },
        PermissionVector {
            name: "namespace empty",
            kind: PermissionKind::Namespace,
            permissions: &[],
            expected: "",
        },
        PermissionVector {
            name: "namespace writer",
            kind: PermissionKind::Namespace,
            permissions: &["WRITE", "READ", "BULK_IMPORT"],
            expected: "000107",
        },
    ]
}

/// Resolve a vector's permission names.
///
/// # Panics
///
/// If a name is unknown for `P`.
pub fn named_set<P: Permission>(names: &[&str]) -> PermissionSet<P> {
    names
        .iter()
        .map(|n| P::from_name(n).expect("vector names are valid"))
        .collect()
}

fn encode_named<P: Permission>(names: &[&str], encode: fn(&[P]) -> Vec<u8>) -> Vec<u8> {
    let perms: Vec<P> = named_set(names).into_iter().collect();
    encode(&perms)
}

/// Encode a permission vector's grants.
pub fn encode_vector(v: &PermissionVector) -> Vec<u8> {
    match v.kind {
        PermissionKind::System => {
            encode_named::<SystemPermission>(v.permissions, |p| encode_system_permissions(p))
        }
        PermissionKind::Table => {
            encode_named::<TablePermission>(v.permissions, |p| encode_table_permissions(p))
        }
        PermissionKind::Namespace => {
            encode_named::<NamespacePermission>(v.permissions, |p| encode_namespace_permissions(p))
        }
    }
}
