//! Default location of the parameter directory.
//!
//! Resolution order: the `PARAMSYNC_DIR` environment variable when set
//! and non-empty, otherwise a `ZcashParams` directory under the
//! platform's local application-data directory (for example
//! `~/.local/share/ZcashParams` on Linux or
//! `%LOCALAPPDATA%\ZcashParams` on Windows).

use camino::Utf8PathBuf;
use directories_next::BaseDirs;
use log::debug;
use std::env;

/// Environment variable overriding the parameter directory.
pub const PARAMS_DIR_ENV: &str = "PARAMSYNC_DIR";

/// Directory name created under the platform data directory.
const PARAMS_DIR_NAME: &str = "ZcashParams";

/// Resolve the default parameter directory.
///
/// Returns `None` when the override is unset and the platform data
/// directory cannot be determined (or is not valid UTF-8).
#[must_use]
pub fn default_params_dir() -> Option<Utf8PathBuf> {
    if let Ok(dir) = env::var(PARAMS_DIR_ENV) {
        if !dir.is_empty() {
            debug!("default_params_dir: {PARAMS_DIR_ENV} override {dir}");
            return Some(Utf8PathBuf::from(dir));
        }
    }
    let base = BaseDirs::new()?;
    let data_local = Utf8PathBuf::from_path_buf(base.data_local_dir().to_path_buf()).ok()?;
    Some(data_local.join(PARAMS_DIR_NAME))
}

#[cfg(test)]
#[path = "params_dir_tests.rs"]
mod tests;
