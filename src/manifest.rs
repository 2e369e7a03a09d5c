//! Version manifest model and version label resolution.
//!
//! The version manifest lists every published version together with the
//! location of its detailed version-info document, and records which ids are
//! the current release and snapshot. A [`VersionLabel`] given on the command
//! line is resolved against it to exactly one version-info URL.

use crate::error::{ExtractorError, Result};
use crate::fetch::{Fetcher, fetch_json};
use crate::output::Console;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The global version manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionManifest {
    /// Ids of the newest release and snapshot.
    pub latest: LatestVersions,
    /// Every known version, newest first.
    pub versions: Vec<VersionSummary>,
}

/// The manifest's pointers to the newest builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestVersions {
    /// Id of the newest stable release.
    pub release: String,
    /// Id of the newest snapshot build.
    pub snapshot: String,
}

/// One entry of the manifest's version list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSummary {
    /// Unique version id, e.g. `1.20.1` or `23w31a`.
    pub id: String,
    /// Location of the version-info document.
    pub url: String,
}

/// A user-supplied version selector.
///
/// # Examples
///
/// ```
/// use mcasset_extractor::manifest::VersionLabel;
///
/// assert_eq!(VersionLabel::from("latest"), VersionLabel::LatestRelease);
/// assert_eq!(VersionLabel::from("latest-snapshot"), VersionLabel::LatestSnapshot);
/// assert_eq!(
///     VersionLabel::from("1.20.1"),
///     VersionLabel::Exact("1.20.1".to_owned())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionLabel {
    /// The manifest's current release.
    LatestRelease,
    /// The manifest's current snapshot.
    LatestSnapshot,
    /// A literal version id.
    Exact(String),
}

impl From<&str> for VersionLabel {
    fn from(value: &str) -> Self {
        match value {
            crate::config::LATEST_RELEASE_LABEL => Self::LatestRelease,
            crate::config::LATEST_SNAPSHOT_LABEL => Self::LatestSnapshot,
            other => Self::Exact(other.to_owned()),
        }
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatestRelease => write!(f, "{}", crate::config::LATEST_RELEASE_LABEL),
            Self::LatestSnapshot => write!(f, "{}", crate::config::LATEST_SNAPSHOT_LABEL),
            Self::Exact(id) => write!(f, "{id}"),
        }
    }
}

/// A label resolved to a concrete version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    /// The concrete version id.
    pub id: String,
    /// Location of the version's info document.
    pub url: String,
}

impl VersionManifest {
    /// Return the concrete id `label` refers to.
    ///
    /// Sentinel labels are substituted with the manifest's recorded ids;
    /// exact labels are returned as given, whether or not they are listed.
    #[must_use]
    pub fn resolve_id<'a>(&'a self, label: &'a VersionLabel) -> &'a str {
        match label {
            VersionLabel::LatestRelease => &self.latest.release,
            VersionLabel::LatestSnapshot => &self.latest.snapshot,
            VersionLabel::Exact(id) => id,
        }
    }

    /// Find the list entry whose id equals `id`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&VersionSummary> {
        self.versions.iter().find(|summary| summary.id == id)
    }

    /// Resolve `label` to its id and version-info URL.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::VersionNotFound`] if no listed version
    /// matches the resolved id.
    pub fn resolve(&self, label: &VersionLabel) -> Result<ResolvedVersion> {
        let id = self.resolve_id(label);
        self.find(id)
            .map(|summary| ResolvedVersion {
                id: summary.id.clone(),
                url: summary.url.clone(),
            })
            .ok_or_else(|| ExtractorError::VersionNotFound { id: id.to_owned() })
    }
}

/// Fetch the version manifest and resolve `label` against it.
///
/// Writes a status line naming the resolved version before searching the
/// version list.
///
/// # Errors
///
/// Returns [`ExtractorError::ManifestDownload`] if the manifest cannot be
/// fetched or parsed, and [`ExtractorError::VersionNotFound`] if the
/// resolved id is not listed.
pub fn resolve_version(
    fetcher: &dyn Fetcher,
    manifest_url: &str,
    label: &VersionLabel,
    console: &mut Console<'_>,
) -> Result<ResolvedVersion> {
    let manifest: VersionManifest =
        fetch_json(fetcher, manifest_url).map_err(ExtractorError::ManifestDownload)?;

    let id = manifest.resolve_id(label);
    console.status(format!("Downloading assets for version {id}"));

    let resolved = manifest.resolve(label)?;
    log::debug!("version {} resolved to {}", resolved.id, resolved.url);
    Ok(resolved)
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
