//! Permission enumerations.
//!
//! Three closed sets of grants, one per scope. Each variant has a fixed byte
//! id; those ids are what gets stored, so they never change.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PermsError, Result};

/// The scope a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionKind {
    /// System-wide operations.
    System,
    /// Operations on a single table.
    Table,
    /// Operations on a namespace and its tables.
    Namespace,
}

impl PermissionKind {
    /// Lower-case name, used in errors and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionKind::System => "system",
            PermissionKind::Table => "table",
            PermissionKind::Namespace => "namespace",
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permission enumeration with a stable byte encoding.
pub trait Permission: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Which scope this enumeration covers.
    const KIND: PermissionKind;

    /// Every variant, in ascending id order.
    const ALL: &'static [Self];

    /// The stored byte id.
    fn id(self) -> u8;

    /// Look up a variant by stored byte id.
    fn from_id(id: u8) -> Option<Self>;

    /// Upper snake case name, e.g. `CREATE_TABLE`.
    fn name(self) -> &'static str;

    /// Look up a variant by id, failing with [`PermsError::UnknownPermission`].
    fn resolve(id: u8) -> Result<Self> {
        Self::from_id(id).ok_or(PermsError::UnknownPermission {
            kind: Self::KIND,
            id,
        })
    }

    /// Look up a variant by name, ignoring ASCII case.
    fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| PermsError::UnknownPermissionName {
                kind: Self::KIND,
                name: name.to_string(),
            })
    }
}

macro_rules! permission_enum {
    (
        $(#[$meta:meta])*
        $name:ident: $kind:expr => {
            $( $(#[$vmeta:meta])* $variant:ident = $id:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $id, )+
        }

        impl Permission for $name {
            const KIND: PermissionKind = $kind;
            const ALL: &'static [Self] = &[ $( $name::$variant, )+ ];

            fn id(self) -> u8 {
                self as u8
            }

            fn from_id(id: u8) -> Option<Self> {
                match id {
                    $( $id => Some($name::$variant), )+
                    _ => None,
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = PermsError;

            fn from_str(s: &str) -> Result<Self> {
                <$name as Permission>::from_name(s)
            }
        }

        impl TryFrom<u8> for $name {
            type Error = PermsError;

            fn try_from(id: u8) -> Result<Self> {
                <$name as Permission>::resolve(id)
            }
        }

        impl From<$name> for u8 {
            fn from(p: $name) -> u8 {
                p.id()
            }
        }
    };
}

permission_enum! {
    /// System-wide permissions.
    SystemPermission: PermissionKind::System => {
        /// Grant system permissions to other users.
        Grant = 0, "GRANT";
        CreateTable = 1, "CREATE_TABLE";
        DropTable = 2, "DROP_TABLE";
        AlterTable = 3, "ALTER_TABLE";
        CreateUser = 4, "CREATE_USER";
        DropUser = 5, "DROP_USER";
        AlterUser = 6, "ALTER_USER";
        /// Administrative access to the whole system.
        System = 7, "SYSTEM";
        CreateNamespace = 8, "CREATE_NAMESPACE";
        DropNamespace = 9, "DROP_NAMESPACE";
        AlterNamespace = 10, "ALTER_NAMESPACE";
        ObtainDelegationToken = 11, "OBTAIN_DELEGATION_TOKEN";
    }
}

permission_enum! {
    /// Per-table permissions.
    ///
    /// Ids 0 and 1 belonged to retired variants and are not resolvable.
    TablePermission: PermissionKind::Table => {
        Read = 2, "READ";
        Write = 3, "WRITE";
        BulkImport = 4, "BULK_IMPORT";
        AlterTable = 5, "ALTER_TABLE";
        Grant = 6, "GRANT";
        DropTable = 7, "DROP_TABLE";
        GetSummaries = 8, "GET_SUMMARIES";
    }
}

permission_enum! {
    /// Per-namespace permissions.
    NamespacePermission: PermissionKind::Namespace => {
        Read = 0, "READ";
        Write = 1, "WRITE";
        AlterNamespace = 2, "ALTER_NAMESPACE";
        Grant = 3, "GRANT";
        AlterTable = 4, "ALTER_TABLE";
        CreateTable = 5, "CREATE_TABLE";
        DropTable = 6, "DROP_TABLE";
        BulkImport = 7, "BULK_IMPORT";
        DropNamespace = 8, "DROP_NAMESPACE";
    }
}
