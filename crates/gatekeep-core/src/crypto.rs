//! The salted hash primitive.
//!
//! Wraps SHA-512 crypt (`$6$`, as produced by glibc `crypt(3)`) behind the
//! [`CryptHasher`] trait. The digest itself is computed by `sha-crypt`; this
//! module owns the textual token format:
//!
//! ```text
//! $<tag>$[rounds=<n>$]<salt>$<digest>
//! ```
//!
//! The salt is 1 to 16 characters from the crypt alphabet. A `rounds=` field
//! appears only when the token was created with non-default rounds.
//!
//! New tokens are always `$6$`. Stored `$5$` (SHA-256 crypt) tokens are
//! re-derived under the same rules so older credentials keep verifying.

use rand::Rng;
use sha_crypt::{sha256_crypt_b64, sha512_crypt_b64, Sha256Params, Sha512Params};

use crate::error::{CryptError, Result};

/// Algorithm tag for SHA-512 crypt.
pub const SHA512_PREFIX: &str = "$6$";

/// Algorithm tag for SHA-256 crypt.
pub const SHA256_PREFIX: &str = "$5$";

/// Rounds used when a token carries no `rounds=` field.
pub const ROUNDS_DEFAULT: u32 = 5_000;

/// Lower bound on rounds; smaller requests are raised to it.
pub const ROUNDS_MIN: u32 = 1_000;

/// Upper bound on rounds; larger requests are lowered to it.
pub const ROUNDS_MAX: u32 = 999_999_999;

/// Longest salt honoured; longer salts are truncated.
pub const SALT_MAX_LEN: usize = 16;

/// Salt length for freshly created tokens.
pub const SALT_DEFAULT_LEN: usize = 8;

/// The crypt alphabet used for salts and digests.
pub const CRYPT_ALPHABET: &[u8; 64] =
    b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const ROUNDS_FIELD: &str = "rounds=";

/// A salted, one-way hash with a self-describing text encoding.
///
/// `existing == None` creates a token with a fresh random salt and the
/// default algorithm. `existing == Some(token)` re-derives a token for
/// `secret` using the algorithm, rounds and salt recorded in `token`; a
/// matching secret reproduces `token` exactly.
pub trait CryptHasher: Send + Sync {
    /// Hash `secret`, either freshly salted or under an existing token's salt.
    fn crypt(&self, secret: &[u8], existing: Option<&str>) -> Result<String>;
}

impl<H: CryptHasher + ?Sized> CryptHasher for std::sync::Arc<H> {
    fn crypt(&self, secret: &[u8], existing: Option<&str>) -> Result<String> {
        (**self).crypt(secret, existing)
    }
}

/// Digest algorithms a token header can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptAlgorithm {
    /// `$5$`
    Sha256,
    /// `$6$`
    Sha512,
}

impl CryptAlgorithm {
    /// The `$<tag>$` prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            CryptAlgorithm::Sha256 => SHA256_PREFIX,
            CryptAlgorithm::Sha512 => SHA512_PREFIX,
        }
    }
}

/// The algorithm, salt and rounds recovered from a token header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParams {
    /// Digest algorithm.
    pub algorithm: CryptAlgorithm,
    /// Rounds to apply.
    pub rounds: u32,
    /// Whether `rounds=` must be written back into the token.
    pub rounds_custom: bool,
    /// Salt characters, at most [`SALT_MAX_LEN`].
    pub salt: String,
}

impl TokenParams {
    /// Parse the header of a SHA-2 crypt token.
    ///
    /// Anything after the salt is ignored, so the same parse serves both a
    /// bare `$6$salt` setting and a complete stored token.
    pub fn parse(token: &str) -> Result<Self> {
        let (algorithm, rest) = if let Some(rest) = token.strip_prefix(SHA512_PREFIX) {
            (CryptAlgorithm::Sha512, rest)
        } else if let Some(rest) = token.strip_prefix(SHA256_PREFIX) {
            (CryptAlgorithm::Sha256, rest)
        } else {
            return Err(unsupported(token));
        };

        let (rounds, rounds_custom, rest) = match parse_rounds_field(rest)? {
            Some((rounds, rest)) => (rounds, true, rest),
            None => (ROUNDS_DEFAULT, false, rest),
        };

        let salt: String = rest
            .bytes()
            .take_while(|b| CRYPT_ALPHABET.contains(b))
            .take(SALT_MAX_LEN)
            .map(char::from)
            .collect();

        if salt.is_empty() {
            return Err(CryptError::MalformedToken("missing salt".to_string()));
        }

        Ok(Self {
            algorithm,
            rounds,
            rounds_custom,
            salt,
        })
    }

    /// Render the token header, `$<tag>$[rounds=<n>$]<salt>`.
    pub fn header(&self) -> String {
        let prefix = self.algorithm.prefix();
        if self.rounds_custom {
            format!("{}{}{}${}", prefix, ROUNDS_FIELD, self.rounds, self.salt)
        } else {
            format!("{}{}", prefix, self.salt)
        }
    }
}

/// Parse an optional `rounds=<digits>$` field.
///
/// A `rounds=` prefix not followed by digits and `$` is not a rounds field;
/// the caller then reads those characters as salt.
fn parse_rounds_field(rest: &str) -> Result<Option<(u32, &str)>> {
    let Some(after) = rest.strip_prefix(ROUNDS_FIELD) else {
        return Ok(None);
    };
    let digits = after.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || after.as_bytes().get(digits) != Some(&b'$') {
        return Ok(None);
    }

    let rounds: u32 = after[..digits]
        .parse()
        .map_err(|_| CryptError::MalformedToken(format!("rounds out of range: {}", &after[..digits])))?;

    Ok(Some((
        rounds.clamp(ROUNDS_MIN, ROUNDS_MAX),
        &after[digits + 1..],
    )))
}

fn primitive(e: impl std::fmt::Debug) -> CryptError {
    CryptError::Primitive(format!("{:?}", e))
}

fn unsupported(token: &str) -> CryptError {
    // Only the algorithm tag is reported; the rest may be sensitive.
    let tag = match token.strip_prefix('$').and_then(|t| t.split_once('$')) {
        Some((tag, _)) => format!("${}$", tag),
        None => "<untagged>".to_string(),
    };
    CryptError::UnsupportedAlgorithm(tag)
}

/// Generate a random salt of `len` crypt-alphabet characters.
pub fn random_salt(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(CRYPT_ALPHABET[rng.gen_range(0..CRYPT_ALPHABET.len())]))
        .collect()
}

/// SHA-512 crypt, compatible with glibc `crypt(3)` `$6$` tokens.
///
/// Also re-derives stored `$5$` tokens; fresh tokens are always `$6$`.
#[derive(Debug, Clone)]
pub struct Sha512Crypt {
    rounds: u32,
    salt_len: usize,
}

impl Sha512Crypt {
    /// Default policy: 5000 rounds (not written), 8-character salt.
    pub fn new() -> Self {
        Self {
            rounds: ROUNDS_DEFAULT,
            salt_len: SALT_DEFAULT_LEN,
        }
    }

    /// Use `rounds` for new tokens. Non-default rounds are recorded in the token.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds.clamp(ROUNDS_MIN, ROUNDS_MAX);
        self
    }

    /// Use `len` salt characters for new tokens (1 to 16).
    pub fn with_salt_len(mut self, len: usize) -> Self {
        self.salt_len = len.clamp(1, SALT_MAX_LEN);
        self
    }

    /// Compute a token for `secret` under explicit parameters.
    pub fn crypt_with(&self, secret: &[u8], params: &TokenParams) -> Result<String> {
        let rounds = params.rounds as usize;
        let salt = params.salt.as_bytes();
        let digest = match params.algorithm {
            CryptAlgorithm::Sha512 => {
                let sha_params = Sha512Params::new(rounds).map_err(primitive)?;
                sha512_crypt_b64(secret, salt, &sha_params).map_err(primitive)?
            }
            CryptAlgorithm::Sha256 => {
                let sha_params = Sha256Params::new(rounds).map_err(primitive)?;
                sha256_crypt_b64(secret, salt, &sha_params).map_err(primitive)?
            }
        };
        Ok(format!("{}${}", params.header(), digest))
    }

    fn fresh_params(&self) -> TokenParams {
        TokenParams {
            algorithm: CryptAlgorithm::Sha512,
            rounds: self.rounds,
            rounds_custom: self.rounds != ROUNDS_DEFAULT,
            salt: random_salt(self.salt_len),
        }
    }
}

impl Default for Sha512Crypt {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptHasher for Sha512Crypt {
    fn crypt(&self, secret: &[u8], existing: Option<&str>) -> Result<String> {
        let params = match existing {
            Some(token) => TokenParams::parse(token)?,
            None => self.fresh_params(),
        };
        self.crypt_with(secret, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_token() {
        let params = TokenParams::parse("$6$saltstring$abcdef").unwrap();
        assert_eq!(params.salt, "saltstring");
        assert_eq!(params.rounds, ROUNDS_DEFAULT);
        assert!(!params.rounds_custom);
    }

    #[test]
    fn test_parse_rounds_token() {
        let params = TokenParams::parse("$6$rounds=10000$saltstringsaltstring$x").unwrap();
        assert_eq!(params.rounds, 10_000);
        assert!(params.rounds_custom);
        // Truncated to 16 characters.
        assert_eq!(params.salt, "saltstringsaltst");
    }

    #[test]
    fn test_parse_clamps_rounds() {
        let low = TokenParams::parse("$6$rounds=10$roundstoolow$x").unwrap();
        assert_eq!(low.rounds, ROUNDS_MIN);
        assert_eq!(low.header(), "$6$rounds=1000$roundstoolow");
    }

    #[test]
    fn test_parse_rounds_overflow_is_malformed() {
        let err = TokenParams::parse("$6$rounds=99999999999999$salt$x").unwrap_err();
        assert!(matches!(err, CryptError::MalformedToken(_)));
    }

    #[test]
    fn test_parse_non_numeric_rounds_reads_as_salt() {
        let params = TokenParams::parse("$6$rounds=abc$x").unwrap();
        assert_eq!(params.salt, "rounds");
        assert!(!params.rounds_custom);
    }

    #[test]
    fn test_parse_rejects_other_algorithms() {
        for token in ["$1$saltsalt$digest", "$2b$10$abc", "$7$saltsalt$digest"] {
            let err = TokenParams::parse(token).unwrap_err();
            assert!(matches!(err, CryptError::UnsupportedAlgorithm(_)), "{}", token);
        }
        let err = TokenParams::parse("plaintext").unwrap_err();
        assert!(matches!(err, CryptError::UnsupportedAlgorithm(ref t) if t == "<untagged>"));
    }

    #[test]
    fn test_parse_rejects_missing_salt() {
        assert!(matches!(
            TokenParams::parse("$6$$digest"),
            Err(CryptError::MalformedToken(_))
        ));
        assert!(matches!(TokenParams::parse("$6$"), Err(CryptError::MalformedToken(_))));
    }

    #[test]
    fn test_known_vector() {
        let hasher = Sha512Crypt::new();
        let token = hasher
            .crypt(b"Hello world!", Some("$6$saltstring"))
            .unwrap();
        assert_eq!(
            token,
            "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uBnIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1"
        );
    }

    #[test]
    fn test_parse_sha256_token() {
        let params = TokenParams::parse("$5$rounds=2000$saltstring$abcdef").unwrap();
        assert_eq!(params.algorithm, CryptAlgorithm::Sha256);
        assert_eq!(params.rounds, 2_000);
        assert_eq!(params.header(), "$5$rounds=2000$saltstring");
    }

    #[test]
    fn test_known_vector_sha256() {
        let token = Sha512Crypt::new()
            .crypt(b"Hello world!", Some("$5$saltstring"))
            .unwrap();
        assert_eq!(token, "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5");
    }

    #[test]
    fn test_sha256_token_rederives() {
        let hasher = Sha512Crypt::new();
        let token = hasher.crypt(b"password", Some("$5$rounds=1000$abcdefgh")).unwrap();
        assert!(token.starts_with("$5$rounds=1000$abcdefgh$"));
        assert_eq!(hasher.crypt(b"password", Some(&token)).unwrap(), token);
        assert_ne!(hasher.crypt(b"Password", Some(&token)).unwrap(), token);
    }

    #[test]
    fn test_fresh_token_shape() {
        let token = Sha512Crypt::new().crypt(b"password", None).unwrap();
        let params = TokenParams::parse(&token).unwrap();
        assert!(token.starts_with(SHA512_PREFIX));
        assert_eq!(params.algorithm, CryptAlgorithm::Sha512);
        assert_eq!(params.salt.len(), SALT_DEFAULT_LEN);
        assert!(!token.contains(ROUNDS_FIELD));
    }

    #[test]
    fn test_rederive_reproduces_token() {
        let hasher = Sha512Crypt::new();
        let token = hasher.crypt(b"password", None).unwrap();
        assert_eq!(hasher.crypt(b"password", Some(&token)).unwrap(), token);
        assert_ne!(hasher.crypt(b"Password", Some(&token)).unwrap(), token);
    }

    #[test]
    fn test_custom_rounds_recorded() {
        let hasher = Sha512Crypt::new().with_rounds(1_000);
        let token = hasher.crypt(b"pw", None).unwrap();
        assert!(token.starts_with("$6$rounds=1000$"));
        assert_eq!(Sha512Crypt::new().crypt(b"pw", Some(&token)).unwrap(), token);
    }

    #[test]
    fn test_random_salt_alphabet() {
        let salt = random_salt(64);
        assert_eq!(salt.len(), 64);
        assert!(salt.bytes().all(|b| CRYPT_ALPHABET.contains(&b)));
    }
}
