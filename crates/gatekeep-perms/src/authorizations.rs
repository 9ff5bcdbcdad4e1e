//! A user's scan authorizations and their stored form.
//!
//! Authorizations are a set of byte-string labels. Two stored forms exist:
//!
//! - **Current**: `!AUTH1:` followed by comma-separated standard base64 of
//!   each label, labels in sorted order.
//! - **Legacy**: comma-separated plain labels, no header. Only labels made of
//!   `[A-Za-z0-9_\-:./]` are representable.
//!
//! [`Authorizations::serialize`] always writes the current form;
//! [`Authorizations::deserialize`] reads both.

use std::collections::BTreeSet;
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{PermsError, Result};

/// Header marking the current stored form.
pub const AUTHORIZATIONS_HEADER: &[u8] = b"!AUTH1:";

/// A sorted, de-duplicated set of authorization labels.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Authorizations {
    labels: BTreeSet<Vec<u8>>,
}

impl Authorizations {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from labels. Every label must be non-empty.
    pub fn from_labels<I, L>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut set = BTreeSet::new();
        for label in labels {
            let label = label.as_ref();
            if label.is_empty() {
                return Err(PermsError::InvalidAuthorization(
                    "empty authorization".to_string(),
                ));
            }
            set.insert(label.to_vec());
        }
        Ok(Self { labels: set })
    }

    /// Whether `label` is present.
    pub fn contains(&self, label: impl AsRef<[u8]>) -> bool {
        self.labels.contains(label.as_ref())
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.labels.iter().map(Vec::as_slice)
    }

    /// Encode in the current stored form.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = AUTHORIZATIONS_HEADER.to_vec();
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                buf.push(b',');
            }
            buf.extend_from_slice(STANDARD.encode(label).as_bytes());
        }
        buf
    }

    /// Decode either stored form.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        match bytes.strip_prefix(AUTHORIZATIONS_HEADER) {
            Some(body) => Self::deserialize_current(body),
            None => Self::deserialize_legacy(bytes),
        }
    }

    fn deserialize_current(body: &[u8]) -> Result<Self> {
        if body.is_empty() {
            return Ok(Self::new());
        }
        let labels = split_fields(body)
            .into_iter()
            .map(|encoded| {
                STANDARD
                    .decode(encoded)
                    .map_err(|e| PermsError::InvalidAuthorization(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_labels(labels)
    }

    fn deserialize_legacy(bytes: &[u8]) -> Result<Self> {
        let parts = split_fields(bytes);
        let mut labels = Vec::with_capacity(parts.len());
        for part in parts {
            let label = trim_ascii(part);
            if let Some(&bad) = label.iter().find(|&&b| !is_valid_label_byte(b)) {
                return Err(PermsError::InvalidAuthorization(format!(
                    "invalid character 0x{:02x} in legacy authorization",
                    bad
                )));
            }
            labels.push(label);
        }
        Self::from_labels(labels)
    }
}

/// Split on commas, dropping trailing empty fields.
fn split_fields(bytes: &[u8]) -> Vec<&[u8]> {
    let mut parts: Vec<&[u8]> = bytes.split(|&b| b == b',').collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}

fn trim_ascii(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if !first.is_ascii_whitespace() {
            break;
        }
        bytes = rest;
    }
    while let [rest @ .., last] = bytes {
        if !last.is_ascii_whitespace() {
            break;
        }
        bytes = rest;
    }
    bytes
}

/// Characters allowed in a legacy, unencoded label.
pub fn is_valid_label_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'.' | b'/')
}

/// Encode a user's authorizations for storage.
pub fn encode_authorizations(authorizations: &Authorizations) -> Vec<u8> {
    authorizations.serialize()
}

/// Decode a user's stored authorizations.
pub fn decode_authorizations(bytes: &[u8]) -> Result<Authorizations> {
    Authorizations::deserialize(bytes)
}

impl fmt::Debug for Authorizations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.labels.iter().map(|l| String::from_utf8_lossy(l)))
            .finish()
    }
}

impl fmt::Display for Authorizations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&String::from_utf8_lossy(label))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_sorted_base64() {
        let auths = Authorizations::from_labels(["public", "A", "private"]).unwrap();
        assert_eq!(auths.serialize(), b"!AUTH1:QQ==,cHJpdmF0ZQ==,cHVibGlj".to_vec());
    }

    #[test]
    fn test_empty_serializes_to_header() {
        let auths = Authorizations::new();
        assert_eq!(auths.serialize(), AUTHORIZATIONS_HEADER.to_vec());
        assert!(Authorizations::deserialize(AUTHORIZATIONS_HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_roundtrip_arbitrary_bytes() {
        let auths = Authorizations::from_labels([&b"a,b"[..], &[0u8, 0xff][..], &b"x y"[..]]).unwrap();
        let decoded = decode_authorizations(&encode_authorizations(&auths)).unwrap();
        assert_eq!(decoded, auths);
        assert!(decoded.contains(b"a,b"));
    }

    #[test]
    fn test_legacy_format() {
        let auths = Authorizations::deserialize(b"public, private,a:b/c.d-e_f,").unwrap();
        assert_eq!(auths.len(), 3);
        assert!(auths.contains("public"));
        assert!(auths.contains("private"));
        assert!(auths.contains("a:b/c.d-e_f"));
    }

    #[test]
    fn test_legacy_empty_input() {
        assert!(Authorizations::deserialize(b"").unwrap().is_empty());
    }

    #[test]
    fn test_legacy_rejects_invalid_characters() {
        let err = Authorizations::deserialize(b"ok,not ok").unwrap_err();
        assert!(matches!(err, PermsError::InvalidAuthorization(_)));
    }

    #[test]
    fn test_trailing_separator_tolerated() {
        let auths = Authorizations::deserialize(b"!AUTH1:QQ==,").unwrap();
        assert_eq!(auths, Authorizations::from_labels(["A"]).unwrap());

        let auths = Authorizations::deserialize(b"!AUTH1:QQ==,Qg==,,").unwrap();
        assert_eq!(auths.len(), 2);
        assert!(Authorizations::deserialize(b"!AUTH1:,").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_empty_label() {
        assert!(Authorizations::deserialize(b"a,,b").is_err());
        assert!(Authorizations::deserialize(b"!AUTH1:QQ==,,Qg==").is_err());
        assert!(Authorizations::from_labels([""]).is_err());
    }

    #[test]
    fn test_rejects_bad_base64() {
        let err = Authorizations::deserialize(b"!AUTH1:not*base64").unwrap_err();
        assert!(matches!(err, PermsError::InvalidAuthorization(_)));
    }

    #[test]
    fn test_display() {
        let auths = Authorizations::from_labels(["b", "a"]).unwrap();
        assert_eq!(auths.to_string(), "a,b");
    }
}
