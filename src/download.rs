//! Content-addressed bulk download of indexed objects.
//!
//! Each object in the asset index is fetched from the object store at
//! `<base>/<shard>/<hash>` and written to `<dest>/assets/<logical path>`.
//! A failed object is logged and counted; it never stops the batch.

use crate::asset_index::{AssetHash, AssetIndex};
use crate::config::ASSETS_DIR;
use crate::extraction::resolve_inside;
use crate::fetch::{FetchError, Fetcher, copy_stream};
use crate::output::Console;
use camino::Utf8Path;
use std::fs;
use std::io::BufWriter;
use std::path::Path;

/// Counts produced by one bulk download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Objects fetched and written successfully.
    pub downloaded: usize,
    /// Objects with an invalid hash or key, or whose fetch or write failed.
    pub failed: usize,
    /// Objects skipped because their directory could not be created.
    pub skipped: usize,
}

/// Build the object store URL for `hash`.
///
/// # Examples
///
/// ```
/// use mcasset_extractor::asset_index::AssetHash;
/// use mcasset_extractor::download::object_url;
///
/// let hash = AssetHash::try_from("abcdef0123").expect("valid hash");
/// assert_eq!(
///     object_url("https://objects.example.test", &hash),
///     "https://objects.example.test/ab/abcdef0123"
/// );
/// ```
#[must_use]
pub fn object_url(base_url: &str, hash: &AssetHash) -> String {
    format!("{base_url}/{}/{hash}", hash.shard())
}

/// Sequential downloader for the objects of an asset index.
pub struct ObjectDownloader<'a> {
    fetcher: &'a dyn Fetcher,
    base_url: &'a str,
}

impl<'a> ObjectDownloader<'a> {
    /// Create a downloader fetching through `fetcher` from `base_url`.
    pub fn new(fetcher: &'a dyn Fetcher, base_url: &'a str) -> Self {
        Self { fetcher, base_url }
    }

    /// Download every object of `index` below `dest_dir/assets`.
    ///
    /// Existing files are overwritten. Per-object failures (an invalid hash,
    /// a key escaping `assets`, a failed request or write) are written to
    /// the console's failure sink with their kind and counted in the
    /// returned report.
    pub fn download_all(
        &self,
        index: &AssetIndex,
        dest_dir: &Utf8Path,
        console: &mut Console<'_>,
    ) -> DownloadReport {
        let assets_dir = dest_dir.join(ASSETS_DIR);
        let mut report = DownloadReport::default();

        for (key, object) in &index.objects {
            console.status(format!("Downloading {key} from object store"));

            let hash = match object.validated_hash() {
                Ok(hash) => hash,
                Err(err) => {
                    console.failure(format!("Failed to download {key} (invalid hash): {err}"));
                    report.failed += 1;
                    continue;
                }
            };

            let target = match resolve_inside(assets_dir.as_std_path(), key) {
                Ok(target) => target,
                Err(err) => {
                    console.failure(format!("Failed to download {key} (path traversal): {err}"));
                    report.failed += 1;
                    continue;
                }
            };

            if target.exists() {
                console.status(format!("Overwriting {}", target.display()));
            }

            if let Some(parent) = target.parent()
                && let Err(err) = ensure_parent(parent)
            {
                console.failure(format!(
                    "Failed to create directory {} ({}): {err}",
                    parent.display(),
                    err.kind()
                ));
                report.skipped += 1;
                continue;
            }

            let url = object_url(self.base_url, &hash);
            match self.fetch_to(&url, &target) {
                Ok(bytes) => {
                    log::debug!("wrote {bytes} bytes to {}", target.display());
                    report.downloaded += 1;
                }
                Err(err) => {
                    console.failure(format!(
                        "Failed to download {key} from {url} ({}): {err}",
                        err.kind()
                    ));
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Stream `url` into a freshly created file at `target`.
    ///
    /// The request is opened before the file is created, so a failed
    /// request leaves no file behind.
    fn fetch_to(&self, url: &str, target: &Path) -> Result<u64, FetchError> {
        let source = self.fetcher.open(url)?;
        let file = fs::File::create(target)?;
        Ok(copy_stream(source, BufWriter::new(file))?)
    }
}

fn ensure_parent(parent: &Path) -> std::io::Result<()> {
    if parent.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(parent)
}

#[cfg(test)]
#[path = "download_tests.rs"]
mod tests;
