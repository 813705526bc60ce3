//! BDD tests for the verify-or-fetch reconciliation workflow.

use camino::Utf8PathBuf;
use paramsync::artifact::spec::ArtifactSpec;
use paramsync::fetch::{ByteStream, FetchError, Fetcher};
use paramsync::reconcile::{
    ArtifactReport, FailureAction, Outcome, ReconcileError, ReconcilePolicy, Reconciler,
};
use paramsync::test_utils::{RecordingSink, spec_matching};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::io::Cursor;
use std::sync::Mutex;

const PAYLOAD: &[u8] = b"0123456789";
const CORRUPT: &[u8] = b"XXXXXXXXXX";

/// A stub [`Fetcher`] that serves canned bytes and records every URL it
/// was asked to open.
struct StubFetcher {
    corrupt_urls: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    fn new(corrupt_urls: Vec<String>) -> Self {
        Self {
            corrupt_urls,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl Fetcher for StubFetcher {
    fn open(&self, url: &str) -> Result<ByteStream, FetchError> {
        self.calls.lock().expect("lock").push(url.to_owned());
        let bytes = if self.corrupt_urls.iter().any(|corrupt| corrupt == url) {
            CORRUPT
        } else {
            PAYLOAD
        };
        Ok(Box::new(Cursor::new(bytes.to_vec())))
    }
}

fn artifact_url(name: &str) -> String {
    format!("http://params.test/{name}")
}

#[derive(Default)]
struct ReconcileWorld {
    _temp_dir: Option<tempfile::TempDir>,
    target_dir: Option<Utf8PathBuf>,
    specs: Vec<ArtifactSpec>,
    corrupt_urls: Vec<String>,
    decline: bool,
    keep_going: bool,
    recorded_calls: Option<Vec<String>>,
    confirmations: Option<usize>,
    result: Option<Result<Vec<ArtifactReport>, ReconcileError>>,
}

impl ReconcileWorld {
    fn add_artifact(&mut self, name: &str) -> Utf8PathBuf {
        self.specs
            .push(spec_matching(name, PAYLOAD, &artifact_url(name)));
        self.target_dir
            .as_ref()
            .expect("target dir set")
            .join(name)
    }

    fn reports(&self) -> &[ArtifactReport] {
        match self.result.as_ref().expect("result set") {
            Ok(reports) => reports,
            Err(err) => panic!("expected reports, got error: {err}"),
        }
    }

    fn error(&self) -> &ReconcileError {
        match self.result.as_ref().expect("result set") {
            Ok(reports) => panic!("expected an error, got reports: {reports:?}"),
            Err(err) => err,
        }
    }
}

fn expected_outcome(label: &str) -> Outcome {
    match label {
        "already valid" => Outcome::AlreadyValid,
        "refetched" => Outcome::Refetched,
        other => panic!("unknown outcome label: {other}"),
    }
}

#[fixture]
fn world() -> ReconcileWorld {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let target_dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).expect("UTF-8 path");
    ReconcileWorld {
        _temp_dir: Some(temp_dir),
        target_dir: Some(target_dir),
        ..Default::default()
    }
}

#[given("an artifact whose local file is already valid")]
fn given_valid_artifact(world: &mut ReconcileWorld) {
    let path = world.add_artifact("a.params");
    std::fs::write(path.as_std_path(), PAYLOAD).expect("write artifact");
}

#[given("an artifact with no local file")]
fn given_missing_artifact(world: &mut ReconcileWorld) {
    world.add_artifact("a.params");
}

#[given("a second artifact with no local file")]
fn given_second_missing_artifact(world: &mut ReconcileWorld) {
    world.add_artifact("b.params");
}

#[given("an artifact whose local file has the wrong size")]
fn given_wrong_size_artifact(world: &mut ReconcileWorld) {
    let path = world.add_artifact("a.params");
    std::fs::write(path.as_std_path(), b"junk").expect("write stale artifact");
}

#[given("a download source serving corrupt bytes")]
fn given_corrupt_source(world: &mut ReconcileWorld) {
    world.corrupt_urls = world
        .specs
        .iter()
        .map(|spec| spec.source_url.clone())
        .collect();
}

#[given("a download source serving corrupt bytes for the first artifact only")]
fn given_corrupt_source_for_first(world: &mut ReconcileWorld) {
    let first = world.specs.first().expect("at least one artifact");
    world.corrupt_urls = vec![first.source_url.clone()];
}

#[given("an operator who declines the download")]
fn given_declining_operator(world: &mut ReconcileWorld) {
    world.decline = true;
}

#[given("a keep-going policy")]
fn given_keep_going_policy(world: &mut ReconcileWorld) {
    world.keep_going = true;
}

#[when("the batch is reconciled")]
fn when_batch_reconciled(world: &mut ReconcileWorld) {
    let target_dir = world.target_dir.clone().expect("target dir set");
    let fetcher = StubFetcher::new(world.corrupt_urls.clone());
    let mut sink = if world.decline {
        RecordingSink::declining()
    } else {
        RecordingSink::approving()
    };
    let policy = ReconcilePolicy {
        on_failure: if world.keep_going {
            FailureAction::Continue
        } else {
            FailureAction::Abort
        },
        ..ReconcilePolicy::default()
    };

    let reconciler = Reconciler::new(world.specs.clone(), policy).expect("valid batch");
    let result = reconciler.reconcile_with(&target_dir, &fetcher, &mut sink);

    world.result = Some(result);
    world.recorded_calls = Some(fetcher.calls.into_inner().expect("lock"));
    world.confirmations = Some(sink.confirmations.len());
}

#[then("the artifact outcome is \"{outcome}\"")]
fn then_artifact_outcome(world: &mut ReconcileWorld, outcome: String) {
    assert_eq!(world.reports()[0].outcome, expected_outcome(&outcome));
}

#[then("the second artifact outcome is \"{outcome}\"")]
fn then_second_artifact_outcome(world: &mut ReconcileWorld, outcome: String) {
    assert_eq!(world.reports()[1].outcome, expected_outcome(&outcome));
}

#[then("the first artifact outcome is a recorded failure")]
fn then_first_outcome_is_failure(world: &mut ReconcileWorld) {
    let outcome = &world.reports()[0].outcome;
    assert!(
        matches!(outcome, Outcome::FetchFailed { .. }),
        "expected FetchFailed, got {outcome:?}"
    );
}

#[then("no download took place")]
fn then_no_download(world: &mut ReconcileWorld) {
    let calls = world.recorded_calls.as_ref().expect("calls recorded");
    assert!(calls.is_empty(), "unexpected downloads: {calls:?}");
}

#[then("no confirmation was requested")]
fn then_no_confirmation(world: &mut ReconcileWorld) {
    assert_eq!(world.confirmations, Some(0));
}

#[then("exactly one confirmation was requested")]
fn then_one_confirmation(world: &mut ReconcileWorld) {
    assert_eq!(world.confirmations, Some(1));
}

#[then("the local file contains the downloaded bytes")]
fn then_file_contains_payload(world: &mut ReconcileWorld) {
    let spec = world.specs.first().expect("at least one artifact");
    let path = world
        .target_dir
        .as_ref()
        .expect("target dir set")
        .join(spec.name.as_str());
    assert_eq!(
        std::fs::read(path.as_std_path()).expect("read artifact"),
        PAYLOAD
    );
}

#[then("reconciliation fails with a digest mismatch")]
fn then_fails_with_digest_mismatch(world: &mut ReconcileWorld) {
    let err = world.error();
    assert!(
        matches!(err, ReconcileError::DigestMismatch { .. }),
        "expected DigestMismatch, got {err:?}"
    );
}

#[then("reconciliation fails because the download was not confirmed")]
fn then_fails_declined(world: &mut ReconcileWorld) {
    let err = world.error();
    assert!(
        matches!(err, ReconcileError::Declined),
        "expected Declined, got {err:?}"
    );
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Valid artifact skips the network"
)]
fn scenario_valid_artifact(world: ReconcileWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Missing artifact is downloaded and verified"
)]
fn scenario_missing_artifact(world: ReconcileWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Stale file is replaced"
)]
fn scenario_stale_file(world: ReconcileWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Corrupt download aborts the batch"
)]
fn scenario_corrupt_download(world: ReconcileWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Declined confirmation aborts the batch"
)]
fn scenario_declined_confirmation(world: ReconcileWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Keep-going policy records failures and continues"
)]
fn scenario_keep_going(world: ReconcileWorld) {
    let _ = world;
}
