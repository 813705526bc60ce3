//! Artifact fetch logic for remote parameter retrieval.
//!
//! Provides a trait-based abstraction over HTTP GET that returns the
//! response body as a byte stream, enabling dependency injection for
//! testing. The production implementation uses `ureq`.

use std::io::Read;
use std::sync::OnceLock;
use std::time::Duration;

/// Connection timeout for parameter downloads.
///
/// Only connection establishment is bounded. Body transfer is left
/// unbounded because parameter files are hundreds of megabytes and
/// transfer time depends entirely on the caller's bandwidth.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// The response body as a blocking byte stream.
///
/// Dropping the stream releases the underlying response and connection;
/// callers clean up on any exit path by letting the stream go out of
/// scope.
pub type ByteStream = Box<dyn Read>;

/// Trait for opening a remote artifact as a byte stream.
///
/// Abstraction allows tests to substitute canned bytes or failures
/// without network access.
///
/// # Examples
///
/// ```
/// use paramsync::fetch::HttpFetcher;
///
/// let fetcher = HttpFetcher;
/// // Use fetcher.open("https://z.cash/downloads/sprout-proving.key") in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Fetcher {
    /// Open the artifact at `url` for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server responds with
    /// a non-success status.
    fn open(&self, url: &str) -> Result<ByteStream, FetchError>;
}

/// Errors arising from artifact fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested artifact was not found (HTTP 404).
    #[error("artifact not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The transfer stopped before the body was fully read.
    #[error("transfer interrupted: {reason}")]
    Interrupted {
        /// A human-readable description of the failure.
        reason: String,
    },
}

/// HTTP-based fetcher using `ureq`.
pub struct HttpFetcher;

impl Fetcher for HttpFetcher {
    fn open(&self, url: &str) -> Result<ByteStream, FetchError> {
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        Ok(Box::new(response.into_body().into_reader()))
    }
}

/// Shared `ureq` agent with connection timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_connect(Some(CONNECT_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`FetchError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(404) => FetchError::NotFound {
            url: url.to_owned(),
        },
        other => FetchError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
