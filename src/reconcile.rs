//! Verify-or-fetch reconciliation of parameter artifacts.
//!
//! The [`Reconciler`] walks a batch of [`ArtifactSpec`]s against a target
//! directory: artifacts whose local file already has the expected size and
//! digest are left untouched (and trigger no network access at all); the
//! rest are deleted, then downloaded from their source URL and verified
//! again. Before the first download of a batch the caller's progress sink
//! is asked to confirm, exactly once.
//!
//! Failures are fatal for the whole batch by default. The
//! [`ReconcilePolicy`] lets callers record per-artifact failures and keep
//! going instead, and controls how many download rounds to attempt.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Read, Write};

use crate::artifact::error::SpecError;
use crate::artifact::name::ArtifactName;
use crate::artifact::spec::ArtifactSpec;
use crate::digest::{CHUNK_SIZE, digest_file};
use crate::fetch::{ByteStream, FetchError, Fetcher, HttpFetcher};
use crate::progress::ProgressSink;

/// Message passed to the confirmation gate before the first download.
const CONFIRM_MESSAGE: &str = concat!(
    "Some parameter files are missing or invalid and must be downloaded. ",
    "This is a one-time operation that may take a long time.",
);

/// What to do when an artifact cannot be brought to a valid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureAction {
    /// Stop the batch at the first failure and return it as an error.
    #[default]
    Abort,
    /// Record the failure in the artifact's report and continue with the
    /// remaining artifacts.
    Continue,
}

/// Caller-configurable reconciliation policy.
///
/// # Examples
///
/// ```
/// use paramsync::reconcile::{FailureAction, ReconcilePolicy};
///
/// let policy = ReconcilePolicy::default();
/// assert_eq!(policy.on_failure, FailureAction::Abort);
/// assert_eq!(policy.fetch_attempts, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcilePolicy {
    /// Whether a failed artifact aborts the batch or is recorded and
    /// skipped.
    pub on_failure: FailureAction,
    /// How many full download-and-verify rounds to attempt per artifact
    /// before declaring failure. Values below 1 are treated as 1. A
    /// failed round is retried from scratch, including when the
    /// downloaded file fails verification.
    pub fetch_attempts: u32,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            on_failure: FailureAction::Abort,
            fetch_attempts: 1,
        }
    }
}

/// The per-artifact result of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The local file already had the expected size and digest; nothing
    /// was downloaded.
    AlreadyValid,
    /// The artifact was downloaded and the fresh file verified.
    Refetched,
    /// The artifact could not be brought to a valid state. Only produced
    /// under [`FailureAction::Continue`]; under the default policy the
    /// failure is returned as a [`ReconcileError`] instead.
    FetchFailed {
        /// A human-readable explanation of the failure.
        reason: String,
    },
}

/// One artifact's outcome, in batch input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    /// The artifact the outcome belongs to.
    pub name: ArtifactName,
    /// What happened to it.
    pub outcome: Outcome,
}

/// Errors that abort a reconciliation batch.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// An I/O operation on the local file system failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact's download failed.
    #[error("download failed for {artifact}: {source}")]
    Network {
        /// Name of the artifact being downloaded.
        artifact: String,
        /// The underlying fetch failure.
        #[source]
        source: FetchError,
    },

    /// A freshly downloaded file did not have the expected byte count.
    #[error("size mismatch for {artifact}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Name of the artifact that failed verification.
        artifact: String,
        /// The byte count the specification requires.
        expected: u64,
        /// The byte count found on disk.
        actual: u64,
    },

    /// A freshly downloaded file did not hash to the expected digest.
    #[error("digest mismatch for {artifact}: expected {expected}, got {actual}")]
    DigestMismatch {
        /// Name of the artifact that failed verification.
        artifact: String,
        /// The digest the specification requires.
        expected: String,
        /// The digest computed from the file on disk.
        actual: String,
    },

    /// The confirmation gate was declined; no download was performed.
    #[error("download not confirmed")]
    Declined,
}

/// Result type alias using [`ReconcileError`].
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// Reconciles a validated batch of artifacts against a directory.
///
/// # Examples
///
/// ```
/// use paramsync::catalog::Catalog;
/// use paramsync::reconcile::{ReconcilePolicy, Reconciler};
///
/// let specs = Catalog::built_in().into_specs();
/// let reconciler = Reconciler::new(specs, ReconcilePolicy::default()).unwrap();
/// assert_eq!(reconciler.specs().len(), 2);
/// // reconciler.reconcile(&dir, &mut sink) runs the verify-or-fetch pass.
/// ```
#[derive(Debug)]
pub struct Reconciler {
    specs: Vec<ArtifactSpec>,
    policy: ReconcilePolicy,
}

impl Reconciler {
    /// Validate the batch and build a reconciler.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::EmptyBatch`] for an empty spec list and
    /// [`SpecError::DuplicateName`] when two specs share a name.
    pub fn new(
        specs: Vec<ArtifactSpec>,
        policy: ReconcilePolicy,
    ) -> std::result::Result<Self, SpecError> {
        if specs.is_empty() {
            return Err(SpecError::EmptyBatch);
        }
        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.name.as_str()) {
                return Err(SpecError::DuplicateName {
                    name: spec.name.to_string(),
                });
            }
        }
        Ok(Self { specs, policy })
    }

    /// Return the batch's artifact specifications, in input order.
    #[must_use]
    pub fn specs(&self) -> &[ArtifactSpec] {
        &self.specs
    }

    /// Reconcile the batch against `target_dir` using the production
    /// HTTP fetcher.
    ///
    /// Blocks the calling thread for the duration of all checks and
    /// downloads; hosts with an interactive thread should run the pass
    /// on a worker.
    ///
    /// # Errors
    ///
    /// See [`reconcile_with`](Self::reconcile_with).
    pub fn reconcile(
        &self,
        target_dir: &Utf8Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<Vec<ArtifactReport>> {
        self.reconcile_with(target_dir, &HttpFetcher, sink)
    }

    /// Testable inner pass with an injected fetcher.
    ///
    /// The production entry point [`reconcile`](Self::reconcile)
    /// delegates here with the real implementation; tests inject stubs
    /// or mocks. This method is public to allow integration tests to do
    /// the same.
    ///
    /// Artifacts are processed strictly sequentially, in input order,
    /// and one report per spec is returned in that order.
    ///
    /// # Errors
    ///
    /// Under [`FailureAction::Abort`] the first failure is returned:
    /// [`ReconcileError::Io`] for local file-system failures,
    /// [`ReconcileError::Network`] for download failures, and
    /// [`ReconcileError::SizeMismatch`] / [`ReconcileError::DigestMismatch`]
    /// when a downloaded file fails verification. Under
    /// [`FailureAction::Continue`] those become
    /// [`Outcome::FetchFailed`] entries instead.
    /// [`ReconcileError::Declined`] always aborts the batch.
    pub fn reconcile_with(
        &self,
        target_dir: &Utf8Path,
        fetcher: &dyn Fetcher,
        sink: &mut dyn ProgressSink,
    ) -> Result<Vec<ArtifactReport>> {
        fs::create_dir_all(target_dir.as_std_path())?;

        let mut confirmed = false;
        let mut reports = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let outcome =
                match self.reconcile_one(target_dir, spec, fetcher, sink, &mut confirmed) {
                    Ok(outcome) => outcome,
                    Err(ReconcileError::Declined) => return Err(ReconcileError::Declined),
                    Err(e) if self.policy.on_failure == FailureAction::Continue => {
                        debug!("reconcile: {} failed, continuing: {e}", spec.name);
                        Outcome::FetchFailed {
                            reason: e.to_string(),
                        }
                    }
                    Err(e) => return Err(e),
                };
            reports.push(ArtifactReport {
                name: spec.name.clone(),
                outcome,
            });
        }
        Ok(reports)
    }

    /// Bring a single artifact to a valid state.
    fn reconcile_one(
        &self,
        target_dir: &Utf8Path,
        spec: &ArtifactSpec,
        fetcher: &dyn Fetcher,
        sink: &mut dyn ProgressSink,
        confirmed: &mut bool,
    ) -> Result<Outcome> {
        let path = target_dir.join(spec.name.as_str());

        // Step 1: Check the existing file. A valid one is left
        // untouched and never touches the network.
        sink.set_status(&format!("Verifying {}...", spec.name));
        if local_file_valid(&path, spec, sink)? {
            debug!("reconcile: {} already valid", spec.name);
            return Ok(Outcome::AlreadyValid);
        }

        // Step 2: One-time confirmation gate, before the first download
        // of the batch only.
        if !*confirmed {
            if !sink.confirm(CONFIRM_MESSAGE) {
                debug!("reconcile: download declined at {}", spec.name);
                return Err(ReconcileError::Declined);
            }
            *confirmed = true;
        }

        // Step 3: Download and re-verify, retrying whole rounds up to
        // the policy's attempt count.
        let mut remaining = self.policy.fetch_attempts.max(1);
        loop {
            match fetch_round(&path, spec, fetcher, sink) {
                Ok(()) => return Ok(Outcome::Refetched),
                Err(e) => {
                    remaining -= 1;
                    if remaining == 0 {
                        return Err(e);
                    }
                    debug!("reconcile: {} round failed, retrying: {e}", spec.name);
                }
            }
        }
    }
}

/// Check whether the file at `path` already satisfies `spec`.
///
/// Absence and wrong length are cheap checks that skip hashing entirely.
fn local_file_valid(
    path: &Utf8Path,
    spec: &ArtifactSpec,
    sink: &mut dyn ProgressSink,
) -> Result<bool> {
    let metadata = match fs::metadata(path.as_std_path()) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("reconcile: {} not present", spec.name);
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_file() {
        debug!("reconcile: {} is not a regular file", spec.name);
        return Ok(false);
    }
    if metadata.len() != spec.expected_size {
        debug!(
            "reconcile: {} has {} bytes, expected {}",
            spec.name,
            metadata.len(),
            spec.expected_size
        );
        return Ok(false);
    }
    let actual = digest_file(path, sink)?;
    Ok(actual == spec.expected_digest)
}

/// One full download round: delete the stale file, stream the remote
/// body to disk, then verify size and digest of the fresh file.
fn fetch_round(
    path: &Utf8Path,
    spec: &ArtifactSpec,
    fetcher: &dyn Fetcher,
    sink: &mut dyn ProgressSink,
) -> Result<()> {
    delete_stale(path)?;

    sink.set_status(&format!("Downloading {}...", spec.name));
    let reader = fetcher
        .open(&spec.source_url)
        .map_err(|source| ReconcileError::Network {
            artifact: spec.name.to_string(),
            source,
        })?;
    write_stream(path, spec, reader, sink)?;

    verify_fetched(path, spec, sink)
}

/// Remove a stale artifact file. Absence is not an error.
fn delete_stale(path: &Utf8Path) -> Result<()> {
    match fs::remove_file(path.as_std_path()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Stream the response body into the artifact file, reporting byte
/// progress against the expected size.
fn write_stream(
    path: &Utf8Path,
    spec: &ArtifactSpec,
    mut reader: ByteStream,
    sink: &mut dyn ProgressSink,
) -> Result<()> {
    let mut file = fs::File::create(path.as_std_path())?;
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut received: u64 = 0;
    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| ReconcileError::Network {
                artifact: spec.name.to_string(),
                source: FetchError::Interrupted {
                    reason: e.to_string(),
                },
            })?;
        if bytes_read == 0 {
            break;
        }
        file.write_all(&buffer[..bytes_read])?;
        received += bytes_read as u64;
        sink.report_progress(received, spec.expected_size);
    }
    Ok(())
}

/// Verify a freshly downloaded file against its specification.
fn verify_fetched(path: &Utf8Path, spec: &ArtifactSpec, sink: &mut dyn ProgressSink) -> Result<()> {
    sink.set_status(&format!("Verifying downloaded {}...", spec.name));
    let actual_size = fs::metadata(path.as_std_path())?.len();
    if actual_size != spec.expected_size {
        return Err(ReconcileError::SizeMismatch {
            artifact: spec.name.to_string(),
            expected: spec.expected_size,
            actual: actual_size,
        });
    }
    let actual = digest_file(path, sink)?;
    if actual != spec.expected_digest {
        return Err(ReconcileError::DigestMismatch {
            artifact: spec.name.to_string(),
            expected: spec.expected_digest.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Join an artifact name onto the target directory.
///
/// Exposed for hosts that report or inspect artifact paths without
/// running a reconciliation pass.
#[must_use]
pub fn artifact_path(target_dir: &Utf8Path, name: &ArtifactName) -> Utf8PathBuf {
    target_dir.join(name.as_str())
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
