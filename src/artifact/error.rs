//! Error types for artifact names, digests, and batch composition.
//!
//! Each variant provides a descriptive message identifying the invalid input
//! and the constraint that was violated.

use thiserror::Error;

/// Errors arising from invalid artifact-related values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// A SHA-256 digest is not a valid 64-character hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidDigest {
        /// Description of the validation failure.
        reason: String,
    },

    /// An artifact name is empty or would escape the target directory.
    #[error("invalid artifact name \"{value}\": {reason}")]
    InvalidName {
        /// The rejected name string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A reconciliation batch contained no artifact specifications.
    #[error("artifact batch is empty")]
    EmptyBatch,

    /// Two artifact specifications in a batch share the same name.
    #[error("duplicate artifact name \"{name}\" in batch")]
    DuplicateName {
        /// The name that appeared more than once.
        name: String,
    },
}

/// Result type alias using [`SpecError`].
pub type Result<T> = std::result::Result<T, SpecError>;
