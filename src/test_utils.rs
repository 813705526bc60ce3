//! Shared helpers for unit, behaviour, and documentation tests.
//!
//! Compiled into the crate for its own tests and exported to
//! downstream test suites through the `test-support` feature.

use crate::artifact::sha256_digest::Sha256Digest;
use crate::artifact::spec::ArtifactSpec;
use crate::progress::ProgressSink;

/// Hex-encode the SHA-256 digest of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256Digest::of_bytes(bytes).into_inner()
}

/// Build a single-artifact catalog document.
#[must_use]
pub fn catalog_json(name: &str, size: u64, sha256: &str, url: &str) -> String {
    serde_json::json!({
        "artifacts": [
            {"name": name, "size": size, "sha256": sha256, "url": url}
        ]
    })
    .to_string()
}

/// Build a specification that `bytes` satisfies exactly.
#[must_use]
pub fn spec_matching(name: &str, bytes: &[u8], url: &str) -> ArtifactSpec {
    ArtifactSpec::new(name, bytes.len() as u64, &sha256_hex(bytes), url)
        .expect("digest and name are valid by construction")
}

/// A progress sink that records every call for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Status lines received, in order.
    pub statuses: Vec<String>,
    /// `(done, total)` pairs received, in order.
    pub progress: Vec<(u64, u64)>,
    /// Confirmation messages received, in order.
    pub confirmations: Vec<String>,
    /// The answer every confirmation request receives.
    pub confirm_answer: bool,
}

impl RecordingSink {
    /// A sink that approves every confirmation request.
    #[must_use]
    pub fn approving() -> Self {
        Self {
            confirm_answer: true,
            ..Self::default()
        }
    }

    /// A sink that declines every confirmation request.
    #[must_use]
    pub fn declining() -> Self {
        Self::default()
    }
}

impl ProgressSink for RecordingSink {
    fn set_status(&mut self, status: &str) {
        self.statuses.push(status.to_owned());
    }

    fn report_progress(&mut self, done: u64, total: u64) {
        self.progress.push((done, total));
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_owned());
        self.confirm_answer
    }
}
