//! Artifact specification records.
//!
//! An [`ArtifactSpec`] describes one fetchable file: where it lives in the
//! parameter directory, how large it must be, what it must hash to, and
//! where to download it from. All newtype validation runs during
//! deserialization, rejecting malformed fields at parse time.

use super::error::Result;
use super::name::ArtifactName;
use super::sha256_digest::Sha256Digest;
use serde::Deserialize;

/// The immutable description of one verified-download artifact.
///
/// The JSON shape used in catalog files:
///
/// ```json
/// {
///   "name": "sprout-proving.key",
///   "size": 910173851,
///   "sha256": "8bc20a7f013b2b58970cddd2e7ea028975c88ae7ceb9259a5344a16bc2c0eef7",
///   "url": "https://z.cash/downloads/sprout-proving.key"
/// }
/// ```
///
/// # Examples
///
/// ```
/// use paramsync::artifact::spec::ArtifactSpec;
///
/// let spec = ArtifactSpec::new(
///     "a.bin",
///     10,
///     "84d89877f0d4041efb6bf91a16f0248f2fd573e6af05c19f96bedb9f882f7882",
///     "https://example.test/a.bin",
/// )
/// .unwrap();
/// assert_eq!(spec.name.as_str(), "a.bin");
/// assert_eq!(spec.expected_size, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtifactSpec {
    /// File name the artifact is stored under in the parameter directory.
    pub name: ArtifactName,
    /// Exact byte count the file must have.
    #[serde(rename = "size")]
    pub expected_size: u64,
    /// SHA-256 digest the file contents must hash to.
    #[serde(rename = "sha256")]
    pub expected_digest: Sha256Digest,
    /// Remote location to fetch the artifact from.
    #[serde(rename = "url")]
    pub source_url: String,
}

impl ArtifactSpec {
    /// Build a specification from raw field values, validating the name
    /// and digest.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`](super::error::SpecError) if the name or
    /// digest fails newtype validation.
    pub fn new(
        name: &str,
        expected_size: u64,
        digest_hex: &str,
        source_url: &str,
    ) -> Result<Self> {
        Ok(Self {
            name: ArtifactName::try_from(name)?,
            expected_size,
            expected_digest: Sha256Digest::try_from(digest_hex)?,
            source_url: source_url.to_owned(),
        })
    }
}
