//! Fixed endpoints, archive layout constants, and run-time policy.
//!
//! The tool reads no configuration files. Every remote location and path
//! prefix lives here as a named constant, and the [`Endpoints`] value groups
//! the two fixed URLs so that the pipeline can be pointed at stub locations
//! in tests without touching the constants.

use std::fmt;

/// URL of the global version manifest listing every published version.
pub const VERSION_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Base URL of the content-addressed object store.
///
/// Objects live at `<base>/<first two hex chars of hash>/<hash>`.
pub const RESOURCES_BASE_URL: &str = "https://resources.download.minecraft.net";

/// Path prefix selecting which client archive entries are materialized.
pub const ASSET_ROOT_PREFIX: &str = "assets";

/// Directory under the destination that receives indexed objects.
pub const ASSETS_DIR: &str = "assets";

/// Label that selects the newest stable release.
pub const LATEST_RELEASE_LABEL: &str = "latest";

/// Label that selects the newest snapshot build.
pub const LATEST_SNAPSHOT_LABEL: &str = "latest-snapshot";

/// Remote locations consumed by a run.
///
/// # Examples
///
/// ```
/// use mcasset_extractor::config::{Endpoints, RESOURCES_BASE_URL};
///
/// let endpoints = Endpoints::default();
/// assert_eq!(endpoints.resources_base_url, RESOURCES_BASE_URL);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Location of the version manifest document.
    pub version_manifest_url: String,
    /// Base URL of the object store, without a trailing slash.
    pub resources_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            version_manifest_url: VERSION_MANIFEST_URL.to_owned(),
            resources_base_url: RESOURCES_BASE_URL.to_owned(),
        }
    }
}

/// What the archive extractor does when copying a single entry fails.
///
/// Traversal attempts, directory creation failures, and a corrupt archive
/// stream are fatal under either policy; the policy only governs per-file
/// copy failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the extraction at the first failed file.
    AbortOnFirst,
    /// Log the failure, count it, and continue with the next entry.
    #[default]
    CollectAndContinue,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AbortOnFirst => write!(f, "abort on first failure"),
            Self::CollectAndContinue => write!(f, "collect failures and continue"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_use_fixed_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.version_manifest_url, VERSION_MANIFEST_URL);
        assert_eq!(endpoints.resources_base_url, RESOURCES_BASE_URL);
    }

    #[test]
    fn resources_base_url_has_no_trailing_slash() {
        assert!(!RESOURCES_BASE_URL.ends_with('/'));
    }

    #[test]
    fn default_policy_collects_failures() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::CollectAndContinue);
    }

    #[test]
    fn policy_display_names_behaviour() {
        assert!(FailurePolicy::AbortOnFirst.to_string().contains("abort"));
        assert!(
            FailurePolicy::CollectAndContinue
                .to_string()
                .contains("continue")
        );
    }
}
