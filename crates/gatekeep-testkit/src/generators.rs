//! Proptest generators for property-based testing.

use std::collections::BTreeSet;

use proptest::prelude::*;

use gatekeep_core::crypto::{CryptAlgorithm, TokenParams, ROUNDS_DEFAULT};
use gatekeep_core::Sha512Crypt;
use gatekeep_perms::{
    Authorizations, NamespacePermissionSet, Permission, SystemPermissionSet, TablePermissionSet,
};

/// Generate a password of up to `max_len` arbitrary bytes.
pub fn secret(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a salt of 1 to 16 crypt-alphabet characters.
pub fn salt() -> impl Strategy<Value = String> {
    "[./0-9A-Za-z]{1,16}".prop_map(String::from)
}

/// Generate a digest algorithm a stored token may carry.
pub fn algorithm() -> impl Strategy<Value = CryptAlgorithm> {
    prop_oneof![Just(CryptAlgorithm::Sha512), Just(CryptAlgorithm::Sha256)]
}

/// Generate a `rounds=` value near the floor, or none for the default.
pub fn rounds() -> impl Strategy<Value = Option<u32>> {
    prop::option::of(1_000u32..=1_500u32)
}

/// Generate any subset of a permission enumeration.
pub fn permission_set<P: Permission>() -> impl Strategy<Value = BTreeSet<P>> {
    prop::sample::subsequence(P::ALL.to_vec(), 0..=P::ALL.len())
        .prop_map(|perms| perms.into_iter().collect())
}

/// Generate a set of system permissions.
pub fn system_permissions() -> impl Strategy<Value = SystemPermissionSet> {
    permission_set()
}

/// Generate a set of table permissions.
pub fn table_permissions() -> impl Strategy<Value = TablePermissionSet> {
    permission_set()
}

/// Generate a set of namespace permissions.
pub fn namespace_permissions() -> impl Strategy<Value = NamespacePermissionSet> {
    permission_set()
}

/// Generate a label expressible in the legacy stored form.
pub fn legacy_label() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_:./-]{1,16}".prop_map(String::from)
}

/// Generate authorizations with arbitrary byte labels.
pub fn authorizations() -> impl Strategy<Value = Authorizations> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 1..24), 0..8)
        .prop_map(|labels| Authorizations::from_labels(labels).expect("labels are non-empty"))
}

/// Parameters for generating a credential token.
#[derive(Debug, Clone)]
pub struct CredentialParams {
    pub algorithm: CryptAlgorithm,
    pub secret: Vec<u8>,
    pub salt: String,
    pub rounds: Option<u32>,
}

impl Arbitrary for CredentialParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (algorithm(), secret(64), salt(), rounds())
            .prop_map(|(algorithm, secret, salt, rounds)| CredentialParams {
                algorithm,
                secret,
                salt,
                rounds,
            })
            .boxed()
    }
}

impl CredentialParams {
    /// The crypt setting string, `$<tag>$[rounds=<n>$]<salt>`.
    pub fn setting(&self) -> String {
        self.token_params().header()
    }

    fn token_params(&self) -> TokenParams {
        TokenParams {
            algorithm: self.algorithm,
            rounds: self.rounds.unwrap_or(ROUNDS_DEFAULT),
            rounds_custom: self.rounds.is_some(),
            salt: self.salt.clone(),
        }
    }
}

/// Generate a stored token from parameters.
pub fn token_from_params(params: &CredentialParams) -> String {
    Sha512Crypt::new()
        .crypt_with(&params.secret, &params.token_params())
        .expect("generated parameters are valid")
}
