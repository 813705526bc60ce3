//! SHA-256 digest newtype for artifact verification.
//!
//! Validates that the value is a 64-character hexadecimal string
//! representing a 256-bit hash digest. Input case is not significant:
//! the digest is normalised to lowercase at construction, so two
//! digests that differ only in case compare equal.

use super::error::{Result, SpecError};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// A validated hex-encoded SHA-256 digest string.
///
/// Stored lowercase regardless of input case, which makes equality
/// checks against published digest tables case-insensitive.
///
/// # Examples
///
/// ```
/// use paramsync::artifact::sha256_digest::Sha256Digest;
///
/// let upper: Sha256Digest = "A".repeat(64).as_str().try_into().unwrap();
/// let lower: Sha256Digest = "a".repeat(64).as_str().try_into().unwrap();
/// assert_eq!(upper, lower);
/// assert_eq!(upper.as_str(), lower.as_str());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Compute the digest of an in-memory byte buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramsync::artifact::sha256_digest::Sha256Digest;
    ///
    /// let digest = Sha256Digest::of_bytes(b"0123456789");
    /// assert_eq!(digest.as_str().len(), 64);
    /// ```
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(bytes)))
    }

    /// Return the digest as a lowercase hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = SpecError;

    fn try_from(value: &str) -> Result<Self> {
        validate_sha256(value)?;
        Ok(Self(value.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for Sha256Digest {
    type Error = SpecError;

    fn try_from(value: String) -> Result<Self> {
        validate_sha256(&value)?;
        Ok(Self(value.to_ascii_lowercase()))
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a well-formed hex-encoded SHA-256 digest.
fn validate_sha256(value: &str) -> Result<()> {
    if value.len() != DIGEST_HEX_LEN {
        return Err(SpecError::InvalidDigest {
            reason: format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                value.len()
            ),
        });
    }
    if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(SpecError::InvalidDigest {
            reason: format!("non-hex character '{bad}'"),
        });
    }
    Ok(())
}
