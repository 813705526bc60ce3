//! Installation of parameter files shipped inside the host binary.
//!
//! Small parameter files are cheaper to embed than to download. Hosts
//! embed them with `include_bytes!` and call [`install_bundled`] to
//! materialise them next to the downloaded artifacts; the reconciler
//! never sees them.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;

/// A parameter file embedded in the host binary.
///
/// # Examples
///
/// ```
/// use paramsync::bundled::BundledResource;
///
/// const VERIFYING_KEY: BundledResource = BundledResource {
///     name: "sprout-verifying.key",
///     bytes: &[0x01, 0x02],
/// };
/// assert_eq!(VERIFYING_KEY.bytes.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BundledResource {
    /// File name to create in the target directory.
    pub name: &'static str,
    /// The embedded file contents.
    pub bytes: &'static [u8],
}

/// Errors raised while writing bundled resources.
#[derive(Debug, thiserror::Error)]
pub enum BundledError {
    /// The target directory could not be created.
    #[error("cannot create parameter directory {path}: {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A resource file could not be written.
    #[error("cannot write bundled resource {name}: {source}")]
    Io {
        /// Name of the resource being written.
        name: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`BundledError`].
pub type Result<T> = std::result::Result<T, BundledError>;

/// Write every bundled resource into `target_dir`, creating the
/// directory first and overwriting existing files.
///
/// # Errors
///
/// Returns [`BundledError::CreateDir`] when the directory cannot be
/// created and [`BundledError::Io`] when a resource cannot be written.
pub fn install_bundled(target_dir: &Utf8Path, resources: &[BundledResource]) -> Result<()> {
    fs::create_dir_all(target_dir.as_std_path()).map_err(|source| BundledError::CreateDir {
        path: target_dir.to_owned(),
        source,
    })?;
    for resource in resources {
        debug!(
            "install_bundled: writing {} ({} bytes)",
            resource.name,
            resource.bytes.len()
        );
        let path = target_dir.join(resource.name);
        fs::write(path.as_std_path(), resource.bytes).map_err(|source| BundledError::Io {
            name: resource.name.to_owned(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "bundled_tests.rs"]
mod tests;
