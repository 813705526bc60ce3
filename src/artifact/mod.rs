//! Type-safe domain model for verified-download artifacts.
//!
//! # Sub-modules
//!
//! - [`error`] - Semantic error types for validation failures.
//! - [`name`] - Artifact file-name newtype (`ArtifactName`).
//! - [`sha256_digest`] - SHA-256 digest newtype (`Sha256Digest`).
//! - [`spec`] - Per-artifact specification record (`ArtifactSpec`).

pub mod error;
pub mod name;
pub mod sha256_digest;
pub mod spec;
