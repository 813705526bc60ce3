//! CLI argument definitions for paramsync.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and
//! focused on orchestration.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::reconcile::{FailureAction, ReconcilePolicy};

/// Verify and fetch Zcash proving parameters.
#[derive(Parser, Debug, Clone)]
#[command(name = "paramsync")]
#[command(version, about)]
#[command(long_about = concat!(
    "Verify and fetch Zcash proving parameters.\n\n",
    "paramsync checks each parameter file in the target directory against its ",
    "expected size and SHA-256 digest. Files that already match are left ",
    "untouched and cost no network traffic; missing or invalid files are ",
    "deleted, then downloaded from their canonical URL and verified again.\n\n",
    "Downloads are confirmed once per run, before the first transfer. Pass ",
    "--yes to skip the prompt in scripts.",
))]
#[command(after_help = concat!(
    "BUILT-IN CATALOG:\n",
    "  sprout-proving.key       910173851 bytes\n",
    "  sprout-groth16.params    725523612 bytes\n\n",
    "CATALOG FILE FORMAT:\n",
    "  {\"artifacts\": [{\"name\": \"...\", \"size\": 123, \"sha256\": \"...\", \"url\": \"...\"}]}\n\n",
    "ENVIRONMENT:\n",
    "  PARAMSYNC_DIR   Override the parameter directory\n\n",
    "EXAMPLES:\n",
    "  Verify and fetch the standard Zcash parameters:\n",
    "    $ paramsync\n\n",
    "  Use a custom directory without prompting:\n",
    "    $ paramsync --dir /var/lib/zcash-params --yes\n\n",
    "  Verify a custom catalog, continuing past failures:\n",
    "    $ paramsync --catalog params.json --keep-going\n\n",
    "For more information, see: https://github.com/leynos/paramsync",
))]
pub struct Cli {
    /// Parameter directory [default: platform-specific].
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<Utf8PathBuf>,

    /// JSON catalog of artifacts [default: built-in Zcash set].
    #[arg(short, long, value_name = "FILE")]
    pub catalog: Option<Utf8PathBuf>,

    /// Answer yes to the download confirmation prompt.
    #[arg(short = 'y', long = "yes")]
    pub assume_yes: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,

    /// Record per-artifact failures and continue instead of aborting.
    #[arg(long)]
    pub keep_going: bool,

    /// Download rounds to attempt per artifact before giving up.
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub attempts: u32,
}

impl Cli {
    /// Translate the failure-handling flags into a reconciliation policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use paramsync::cli::Cli;
    /// use paramsync::reconcile::FailureAction;
    ///
    /// let cli = Cli::parse_from(["paramsync", "--keep-going", "--attempts", "3"]);
    /// let policy = cli.policy();
    /// assert_eq!(policy.on_failure, FailureAction::Continue);
    /// assert_eq!(policy.fetch_attempts, 3);
    /// ```
    #[must_use]
    pub fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy {
            on_failure: if self.keep_going {
                FailureAction::Continue
            } else {
                FailureAction::Abort
            },
            fetch_attempts: self.attempts,
        }
    }
}

impl Default for Cli {
    /// Creates a `Cli` instance with all flags disabled, as if paramsync
    /// had been invoked with no arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramsync::cli::Cli;
    ///
    /// let cli = Cli::default();
    /// assert!(cli.dir.is_none());
    /// assert!(!cli.assume_yes);
    /// assert_eq!(cli.attempts, 1);
    /// ```
    fn default() -> Self {
        Self {
            dir: None,
            catalog: None,
            assume_yes: false,
            quiet: false,
            keep_going: false,
            attempts: 1,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
