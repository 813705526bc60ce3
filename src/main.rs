//! paramsync CLI entrypoint.
//!
//! This binary verifies Zcash proving parameters on disk and downloads
//! any that are missing or invalid, asking for confirmation once before
//! the first transfer. Exit status: 0 when every artifact is valid,
//! 2 when the operator declines the download, 1 for any other failure.

use camino::Utf8PathBuf;
use clap::Parser;
use paramsync::catalog::Catalog;
use paramsync::cli::Cli;
use paramsync::error::{ParamsyncError, Result};
use paramsync::params_dir::default_params_dir;
use paramsync::progress::{ProgressSink, TextSink};
use paramsync::reconcile::{ArtifactReport, Outcome, ReconcileError, Reconciler};
use std::io::Write;

const EXIT_FAILURE: i32 = 1;
const EXIT_DECLINED: i32 = 2;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<Vec<ArtifactReport>> {
    // Step 1: Load the artifact catalog.
    let catalog = load_catalog(cli)?;

    // Step 2: Resolve the parameter directory.
    let target_dir = determine_params_dir(cli.dir.clone())?;
    if !cli.quiet {
        write_stderr_line(
            stderr,
            format!(
                "Reconciling {} artifact(s) in {target_dir}...",
                catalog.artifacts().len()
            ),
        );
    }

    // Step 3: Verify every artifact, fetching the invalid ones.
    let reconciler = Reconciler::new(catalog.into_specs(), cli.policy())?;
    let mut sink = ConsoleSink::for_cli(cli);
    let reports = reconciler.reconcile(&target_dir, &mut sink)?;

    // Step 4: Report per-artifact outcomes.
    report_outcomes(&reports, cli.quiet, stderr);
    Ok(reports)
}

/// Loads the catalog named on the command line, or the built-in set.
fn load_catalog(cli: &Cli) -> Result<Catalog> {
    match &cli.catalog {
        Some(path) => Ok(Catalog::load(path)?),
        None => Ok(Catalog::built_in()),
    }
}

/// Determines the parameter directory from the CLI or falls back to the
/// platform default.
fn determine_params_dir(cli_dir: Option<Utf8PathBuf>) -> Result<Utf8PathBuf> {
    cli_dir
        .or_else(default_params_dir)
        .ok_or(ParamsyncError::NoParamsDir)
}

/// Prints one outcome line per artifact. Successes are suppressed in
/// quiet mode; failures are always shown.
fn report_outcomes(reports: &[ArtifactReport], quiet: bool, stderr: &mut dyn Write) {
    for report in reports {
        let line = match &report.outcome {
            Outcome::AlreadyValid => format!("{}: already valid", report.name),
            Outcome::Refetched => format!("{}: downloaded and verified", report.name),
            Outcome::FetchFailed { reason } => format!("{}: FAILED: {reason}", report.name),
        };
        let is_failure = matches!(report.outcome, Outcome::FetchFailed { .. });
        if !quiet || is_failure {
            write_stderr_line(stderr, line);
        }
    }
}

fn exit_code_for_run_result(result: Result<Vec<ArtifactReport>>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(reports) => {
            let any_failed = reports
                .iter()
                .any(|report| matches!(report.outcome, Outcome::FetchFailed { .. }));
            if any_failed { EXIT_FAILURE } else { 0 }
        }
        Err(err) => {
            write_stderr_line(stderr, &err);
            if matches!(err, ParamsyncError::Reconcile(ReconcileError::Declined)) {
                EXIT_DECLINED
            } else {
                EXIT_FAILURE
            }
        }
    }
}

/// Progress sink for interactive runs: statuses and percentages go to
/// stderr, the confirmation gate prompts on stdin.
struct ConsoleSink {
    text: Option<TextSink<std::io::Stderr>>,
    assume_yes: bool,
}

impl ConsoleSink {
    fn for_cli(cli: &Cli) -> Self {
        let text = (!cli.quiet).then(|| TextSink::new(std::io::stderr(), true));
        Self {
            text,
            assume_yes: cli.assume_yes,
        }
    }
}

impl ProgressSink for ConsoleSink {
    fn set_status(&mut self, text: &str) {
        if let Some(sink) = &mut self.text {
            sink.set_status(text);
        }
    }

    fn report_progress(&mut self, current: u64, total: u64) {
        if let Some(sink) = &mut self.text {
            sink.report_progress(current, total);
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            // Still announce what --yes has agreed to.
            if let Some(sink) = &mut self.text {
                return sink.confirm(message);
            }
            return true;
        }
        prompt_for_confirmation(message)
    }
}

/// Prints the confirmation prompt and reads the operator's answer.
fn prompt_for_confirmation(message: &str) -> bool {
    let mut stderr = std::io::stderr();
    write_stderr_line(&mut stderr, message);
    if write!(stderr, "Proceed with download? [y/N] ")
        .and_then(|()| stderr.flush())
        .is_err()
    {
        // Best-effort prompt; still wait for the answer.
    }
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    parse_confirmation(&answer)
}

/// Interprets an interactive answer; anything but yes declines.
fn parse_confirmation(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
