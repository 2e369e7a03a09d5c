//! Fatal error types for the extractor pipeline.
//!
//! Every variant here ends the run with exit status 1. Per-item failures
//! (a single archive entry or a single indexed object) never surface as an
//! [`ExtractorError`]; they are counted in the phase reports instead.

use crate::extraction::ExtractionError;
use crate::fetch::FetchError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that abort the whole run.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// The destination already exists; nothing is fetched or written.
    #[error("output directory already exists: {path}")]
    DestinationExists {
        /// The destination that was found on disk.
        path: Utf8PathBuf,
    },

    /// The version manifest could not be fetched or parsed.
    #[error("failed to download version manifest: {0}")]
    ManifestDownload(#[source] FetchError),

    /// No manifest entry matches the resolved version id.
    #[error("failed to find version info url for version {id}")]
    VersionNotFound {
        /// The resolved version id that was searched for.
        id: String,
    },

    /// The version-info document could not be fetched or parsed.
    #[error("failed to download version info: {0}")]
    VersionInfoDownload(#[source] FetchError),

    /// The client archive could not be fetched.
    #[error("failed to download client archive: {0}")]
    ClientDownload(#[source] FetchError),

    /// The client archive could not be extracted.
    #[error("failed to unzip client archive: {0}")]
    Extraction(#[from] ExtractionError),

    /// The asset index could not be fetched or parsed.
    #[error("failed to download asset index: {0}")]
    AssetIndexDownload(#[source] FetchError),

    /// An I/O operation outside any phase failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`ExtractorError`].
pub type Result<T> = std::result::Result<T, ExtractorError>;
