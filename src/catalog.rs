//! Artifact catalogs: the built-in Zcash parameter set and JSON files.
//!
//! A catalog is an ordered list of [`ArtifactSpec`]s. Hosts either use
//! [`Catalog::built_in`] for the standard Zcash proving parameters or
//! load their own JSON catalog with [`Catalog::load`]:
//!
//! ```json
//! {
//!   "artifacts": [
//!     {
//!       "name": "sprout-proving.key",
//!       "size": 910173851,
//!       "sha256": "8bc20a7f013b2b58970cddd2e7ea028975c88ae7ceb9259a5344a16bc2c0eef7",
//!       "url": "https://z.cash/downloads/sprout-proving.key"
//!     }
//!   ]
//! }
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use std::fs;

use crate::artifact::spec::ArtifactSpec;

/// Name of the Sprout proving key artifact.
const SPROUT_PROVING_KEY_NAME: &str = "sprout-proving.key";
/// Byte count of the Sprout proving key.
const SPROUT_PROVING_KEY_SIZE: u64 = 910_173_851;
/// SHA-256 digest of the Sprout proving key.
const SPROUT_PROVING_KEY_SHA256: &str =
    "8bc20a7f013b2b58970cddd2e7ea028975c88ae7ceb9259a5344a16bc2c0eef7";
/// Canonical download location of the Sprout proving key.
const SPROUT_PROVING_KEY_URL: &str = "https://z.cash/downloads/sprout-proving.key";

/// Name of the Sprout Groth16 parameter artifact.
const SPROUT_GROTH16_NAME: &str = "sprout-groth16.params";
/// Byte count of the Sprout Groth16 parameters.
const SPROUT_GROTH16_SIZE: u64 = 725_523_612;
/// SHA-256 digest of the Sprout Groth16 parameters.
const SPROUT_GROTH16_SHA256: &str =
    "b685d700c60328498fbde589c8c7c484c722b788b265b72af448a5bf0ee55b50";
/// Canonical download location of the Sprout Groth16 parameters.
const SPROUT_GROTH16_URL: &str = "https://z.cash/downloads/sprout-groth16.params";

/// Errors raised while reading or parsing a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("cannot read catalog {path}: {source}")]
    Io {
        /// Path of the catalog file.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The catalog JSON was malformed or contained an invalid artifact
    /// specification.
    #[error("catalog parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;

/// An ordered collection of artifact specifications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    artifacts: Vec<ArtifactSpec>,
}

impl Catalog {
    /// Build a catalog from already-validated specifications.
    #[must_use]
    pub fn new(artifacts: Vec<ArtifactSpec>) -> Self {
        Self { artifacts }
    }

    /// The standard Zcash proving parameter set: the Sprout proving key
    /// and the Sprout Groth16 parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramsync::catalog::Catalog;
    ///
    /// let catalog = Catalog::built_in();
    /// assert_eq!(catalog.artifacts()[0].name.as_str(), "sprout-proving.key");
    /// ```
    #[must_use]
    pub fn built_in() -> Self {
        // The constants above are compile-time fixed and covered by
        // tests, so constructing specs from them cannot fail.
        let artifacts = vec![
            ArtifactSpec::new(
                SPROUT_PROVING_KEY_NAME,
                SPROUT_PROVING_KEY_SIZE,
                SPROUT_PROVING_KEY_SHA256,
                SPROUT_PROVING_KEY_URL,
            )
            .expect("built-in artifact constants are valid"),
            ArtifactSpec::new(
                SPROUT_GROTH16_NAME,
                SPROUT_GROTH16_SIZE,
                SPROUT_GROTH16_SHA256,
                SPROUT_GROTH16_URL,
            )
            .expect("built-in artifact constants are valid"),
        ];
        Self { artifacts }
    }

    /// Load and parse a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] when the file cannot be read and
    /// [`CatalogError::Json`] when its contents do not parse as a
    /// catalog of valid artifact specifications.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        debug!("load: reading catalog from {path}");
        let json = fs::read_to_string(path.as_std_path()).map_err(|source| CatalogError::Io {
            path: path.to_owned(),
            source,
        })?;
        parse_catalog(&json)
    }

    /// The catalog's specifications, in file order.
    #[must_use]
    pub fn artifacts(&self) -> &[ArtifactSpec] {
        &self.artifacts
    }

    /// Consume the catalog, yielding its specifications.
    #[must_use]
    pub fn into_specs(self) -> Vec<ArtifactSpec> {
        self.artifacts
    }
}

/// Parse catalog JSON.
///
/// Invalid names and digests are rejected here: the artifact field
/// types validate themselves during deserialization.
///
/// # Errors
///
/// Returns [`CatalogError::Json`] when the input is not a valid
/// catalog document.
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let catalog: Catalog = serde_json::from_str(json)?;
    debug!("parse_catalog: {} artifact(s)", catalog.artifacts.len());
    Ok(catalog)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
