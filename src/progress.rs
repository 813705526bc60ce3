//! Progress reporting seam between reconciliation and its host.
//!
//! The reconciler never prints or prompts directly. All user-facing
//! output (status lines, byte counts, the pre-download confirmation)
//! goes through the [`ProgressSink`] trait, so terminal hosts and GUI
//! hosts can each present it their own way.

use std::io::Write;

/// Receives user-facing output from a reconciliation pass.
///
/// Implementations decide presentation. The reconciler calls
/// [`confirm`](ProgressSink::confirm) at most once per batch, and only
/// when at least one artifact actually needs downloading.
pub trait ProgressSink {
    /// Replace the current status line (e.g. `"Downloading sprout-proving.key..."`).
    fn set_status(&mut self, text: &str);

    /// Report that `current` of `total` bytes have been processed.
    fn report_progress(&mut self, current: u64, total: u64);

    /// Ask the user whether downloading may begin. Returning `false`
    /// aborts the batch before any fetch.
    fn confirm(&mut self, message: &str) -> bool;
}

/// A sink that discards all output and approves confirmations.
///
/// Suitable for unattended use and tests that do not inspect progress.
///
/// # Examples
///
/// ```
/// use paramsync::progress::{ProgressSink, SilentSink};
///
/// let mut sink = SilentSink;
/// sink.set_status("Verifying...");
/// assert!(sink.confirm("Proceed?"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl ProgressSink for SilentSink {
    fn set_status(&mut self, _text: &str) {}

    fn report_progress(&mut self, _current: u64, _total: u64) {}

    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// A sink that writes status lines and coarse percentage steps to a writer.
///
/// Progress is reported once per ten-percent step rather than per chunk,
/// keeping output readable for multi-hundred-megabyte transfers. The
/// confirmation answer is fixed at construction; interactive hosts layer
/// their own prompting on top. Write failures are ignored.
///
/// # Examples
///
/// ```
/// use paramsync::progress::{ProgressSink, TextSink};
///
/// let mut sink = TextSink::new(Vec::new(), true);
/// sink.set_status("Downloading a.bin...");
/// sink.report_progress(50, 100);
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert!(output.contains("Downloading a.bin..."));
/// assert!(output.contains("50%"));
/// ```
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
    proceed: bool,
    last_decile: Option<u64>,
}

impl<W: Write> TextSink<W> {
    /// Create a sink writing to `out`, answering `proceed` to confirmations.
    #[must_use]
    pub fn new(out: W, proceed: bool) -> Self {
        Self {
            out,
            proceed,
            last_decile: None,
        }
    }

    /// Consume the sink and return the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, text: &str) {
        if writeln!(self.out, "{text}").is_err() {
            // Best-effort output; ignore write failures.
        }
    }
}

impl<W: Write> ProgressSink for TextSink<W> {
    fn set_status(&mut self, text: &str) {
        self.last_decile = None;
        self.write_line(text);
    }

    fn report_progress(&mut self, current: u64, total: u64) {
        if total == 0 {
            return;
        }
        let percent = current.saturating_mul(100) / total;
        let decile = percent / 10;
        if self.last_decile == Some(decile) {
            return;
        }
        self.last_decile = Some(decile);
        self.write_line(&format!("  {percent}%"));
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.write_line(message);
        self.proceed
    }
}
