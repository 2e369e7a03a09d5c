//! Version-info document model.
//!
//! Each version has a detail document naming its downloadable artifacts and
//! the asset index that lists its content-addressed objects. Only the fields
//! the pipeline consumes are modelled; everything else is ignored.

use crate::error::{ExtractorError, Result};
use crate::fetch::{Fetcher, fetch_json};
use serde::{Deserialize, Serialize};

/// The detail document for one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Named downloadable artifacts.
    pub downloads: Downloads,
    /// Reference to the version's asset index document.
    #[serde(rename = "assetIndex")]
    pub asset_index: AssetIndexRef,
}

/// The artifacts section of a version-info document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Downloads {
    /// The client archive.
    pub client: Artifact,
}

/// A single downloadable artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Download location.
    pub url: String,
    /// Declared SHA-1 of the artifact, when published.
    #[serde(default)]
    pub sha1: Option<String>,
    /// Declared size in bytes, when published.
    #[serde(default)]
    pub size: Option<u64>,
}

/// Pointer from a version to its asset index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIndexRef {
    /// Asset index id, e.g. `5`.
    #[serde(default)]
    pub id: Option<String>,
    /// Location of the asset index document.
    pub url: String,
}

impl VersionInfo {
    /// Location of the client archive.
    #[must_use]
    pub fn client_url(&self) -> &str {
        &self.downloads.client.url
    }

    /// Location of the asset index document.
    #[must_use]
    pub fn asset_index_url(&self) -> &str {
        &self.asset_index.url
    }
}

/// Fetch and parse the version-info document at `url`.
///
/// # Errors
///
/// Returns [`ExtractorError::VersionInfoDownload`] on any network or parse
/// failure.
pub fn fetch_version_info(fetcher: &dyn Fetcher, url: &str) -> Result<VersionInfo> {
    fetch_json(fetcher, url).map_err(ExtractorError::VersionInfoDownload)
}
