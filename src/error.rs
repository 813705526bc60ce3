//! Crate-wide error type aggregating per-module failures.

use crate::artifact::error::SpecError;
use crate::bundled::BundledError;
use crate::catalog::CatalogError;
use crate::reconcile::ReconcileError;

/// Any failure the crate can report to a host.
#[derive(Debug, thiserror::Error)]
pub enum ParamsyncError {
    /// An artifact specification was invalid.
    #[error("invalid artifact specification: {0}")]
    Spec(#[from] SpecError),

    /// A catalog could not be read or parsed.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// A reconciliation pass failed.
    #[error("{0}")]
    Reconcile(#[from] ReconcileError),

    /// Bundled resources could not be installed.
    #[error("{0}")]
    Bundled(#[from] BundledError),

    /// No parameter directory could be resolved.
    #[error("cannot determine a parameter directory; set PARAMSYNC_DIR or pass an explicit path")]
    NoParamsDir,
}

/// Result type alias using [`ParamsyncError`].
pub type Result<T> = std::result::Result<T, ParamsyncError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn spec_errors_are_prefixed() {
        let err = ParamsyncError::from(SpecError::EmptyBatch);

        assert_eq!(
            err.to_string(),
            "invalid artifact specification: artifact batch is empty"
        );
    }

    #[rstest]
    fn reconcile_errors_pass_through() {
        let err = ParamsyncError::from(ReconcileError::Declined);

        assert_eq!(err.to_string(), "download not confirmed");
    }

    #[rstest]
    fn missing_params_dir_names_the_override() {
        let message = ParamsyncError::NoParamsDir.to_string();

        assert!(message.contains("PARAMSYNC_DIR"));
    }
}
