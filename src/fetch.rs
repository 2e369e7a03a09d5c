//! HTTP fetching and stream copying.
//!
//! Provides a trait-based abstraction over the blocking HTTP transport so
//! that every pipeline phase can be exercised without network access, plus
//! the stream copier that drains a readable source into a writable sink.

use serde::de::DeserializeOwned;
use std::io::{BufReader, Read, Write};
use std::sync::OnceLock;

/// Trait for opening remote byte streams.
///
/// # Examples
///
/// ```
/// use mcasset_extractor::fetch::UreqFetcher;
///
/// let fetcher = UreqFetcher;
/// // Use fetcher.open("https://example.test/file") in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Fetcher {
    /// Open a readable stream over the body of `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] for a 404 response and
    /// [`FetchError::Http`] for any other transport or status failure.
    fn open(&self, url: &str) -> Result<Box<dyn Read>, FetchError>;
}

/// Errors arising from fetching remote documents and objects.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request failed or returned a non-success status.
    #[error("download failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The remote resource does not exist (HTTP 404).
    #[error("resource not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The body could not be parsed as the expected JSON document.
    #[error("invalid JSON from {url}: {source}")]
    Json {
        /// The URL whose body failed to parse.
        url: String,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Reading the body or writing it out failed.
    #[error("I/O error during download: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Short name of the failure class, for per-item failure lines.
    ///
    /// I/O failures carry their [`std::io::ErrorKind`].
    ///
    /// # Examples
    ///
    /// ```
    /// use mcasset_extractor::fetch::FetchError;
    ///
    /// let err = FetchError::NotFound { url: "https://example.test/x".to_owned() };
    /// assert_eq!(err.kind(), "not found");
    /// ```
    #[must_use]
    pub fn kind(&self) -> String {
        match self {
            Self::Http { .. } => "http".to_owned(),
            Self::NotFound { .. } => "not found".to_owned(),
            Self::Json { .. } => "json".to_owned(),
            Self::Io(err) => format!("io: {}", err.kind()),
        }
    }
}

/// HTTP fetcher backed by a shared blocking `ureq` agent.
///
/// No timeout, retry, or redirect policy is applied beyond the transport's
/// defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqFetcher;

impl Fetcher for UreqFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read>, FetchError> {
        log::debug!("GET {url}");
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        Ok(Box::new(response.into_body().into_reader()))
    }
}

/// Shared `ureq` agent for the whole run.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(true)
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

/// Drain `source` into `sink` until exhaustion, then flush and close the sink.
///
/// The sink is taken by value and dropped on return, so it is always closed.
/// Whether the source is closed is decided by the caller: pass it by value
/// to close it, or pass `&mut source` to keep it open (as when reading
/// successive entries from one archive stream).
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns any read, write, or flush failure.
///
/// # Examples
///
/// ```
/// use mcasset_extractor::fetch::copy_stream;
///
/// let mut sink = Vec::new();
/// let copied = copy_stream(&b"hello"[..], &mut sink).expect("copy");
/// assert_eq!(copied, 5);
/// assert_eq!(sink, b"hello");
/// ```
pub fn copy_stream<R: Read, W: Write>(mut source: R, mut sink: W) -> std::io::Result<u64> {
    let copied = std::io::copy(&mut source, &mut sink)?;
    sink.flush()?;
    Ok(copied)
}

/// Download `url` fully into memory.
///
/// # Errors
///
/// Returns an error if the request or the body read fails.
pub fn fetch_bytes(fetcher: &dyn Fetcher, url: &str) -> Result<Vec<u8>, FetchError> {
    let source = fetcher.open(url)?;
    let mut body = Vec::new();
    copy_stream(source, &mut body)?;
    log::debug!("fetched {} bytes from {url}", body.len());
    Ok(body)
}

/// Download `url` and deserialize the body as JSON.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not a valid `T`.
pub fn fetch_json<T: DeserializeOwned>(fetcher: &dyn Fetcher, url: &str) -> Result<T, FetchError> {
    let source = fetcher.open(url)?;
    serde_json::from_reader(BufReader::new(source)).map_err(|source| FetchError::Json {
        url: url.to_owned(),
        source,
    })
}
