//! Constant-time comparison.
//!
//! Every comparison between a stored credential and a derived one goes
//! through [`ct_eq`]. The running time depends only on the slice lengths,
//! never on the position of the first differing byte.

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time.
///
/// Slices of different length compare unequal. Length is not treated as
/// secret.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
