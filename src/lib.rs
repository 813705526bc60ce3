//! Paramsync library.
//!
//! This crate verifies Zcash proving parameters on disk and downloads any
//! that are missing or invalid, checking size and SHA-256 digest before
//! and after every transfer. It is used by the `paramsync` CLI binary and
//! can be consumed programmatically by wallets and other hosts that need
//! the parameter files in place before first use.
//!
//! # Modules
//!
//! - [`artifact`] - Validated artifact names, digests, and specifications
//! - [`bundled`] - Installation of parameter files embedded in the host
//! - [`catalog`] - The built-in Zcash parameter set and JSON catalogs
//! - [`cli`] - Command-line argument definitions
//! - [`digest`] - Streaming SHA-256 hashing of local files
//! - [`error`] - Crate-wide error type aggregating per-module failures
//! - [`fetch`] - HTTP retrieval of artifact bodies
//! - [`params_dir`] - Default location of the parameter directory
//! - [`progress`] - Progress and confirmation reporting
//! - [`reconcile`] - The verify-or-fetch reconciliation pass

pub mod artifact;
pub mod bundled;
pub mod catalog;
pub mod cli;
pub mod digest;
pub mod error;
pub mod fetch;
pub mod params_dir;
pub mod progress;
pub mod reconcile;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
