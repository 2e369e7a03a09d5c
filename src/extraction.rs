//! Client archive extraction.
//!
//! Streams the entries of a zip archive held in memory, materializing those
//! under the asset-root prefix into the destination directory. Every entry
//! path is resolved against the canonical destination and rejected if it
//! would land outside it (zip-slip).

use crate::config::{ASSET_ROOT_PREFIX, FailurePolicy};
use crate::fetch::copy_stream;
use crate::output::Console;
use camino::Utf8Path;
use std::fs;
use std::io::{BufWriter, Cursor};
use std::path::{Component, Path, PathBuf};

/// Trait for extracting the client archive, enabling test substitution.
pub trait ArchiveExtractor {
    /// Extract the matching entries of `archive` into `dest_dir`.
    ///
    /// `dest_dir` is created if absent.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::PathTraversal`] if any matching entry
    /// resolves outside `dest_dir`, [`ExtractionError::CreateDir`] if a
    /// directory cannot be created, [`ExtractionError::Zip`] if the archive
    /// stream is corrupt, and [`ExtractionError::Entry`] for a failed file
    /// copy when the extractor aborts on the first failure.
    fn extract(
        &self,
        archive: &[u8],
        dest_dir: &Utf8Path,
        console: &mut Console<'_>,
    ) -> Result<ExtractionReport, ExtractionError>;
}

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The archive stream could not be read.
    #[error("corrupt archive stream: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An entry path resolves outside the destination.
    #[error("entry outside target: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: String,
    },

    /// A directory needed for extraction could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A file entry could not be written.
    #[error("failed to extract {entry}: {source}")]
    Entry {
        /// The entry name.
        entry: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The destination could not be canonicalized.
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Counts produced by one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Files written successfully.
    pub extracted: usize,
    /// Files whose copy failed and were skipped.
    pub failed: usize,
}

/// Streaming zip extractor with a configurable failure policy.
///
/// # Examples
///
/// ```
/// use mcasset_extractor::config::FailurePolicy;
/// use mcasset_extractor::extraction::ZipExtractor;
///
/// let extractor = ZipExtractor::new(FailurePolicy::AbortOnFirst);
/// assert_eq!(extractor.prefix(), "assets");
/// ```
#[derive(Debug, Clone)]
pub struct ZipExtractor {
    prefix: String,
    policy: FailurePolicy,
}

impl ZipExtractor {
    /// Create an extractor for the asset-root prefix using `policy`.
    #[must_use]
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            prefix: ASSET_ROOT_PREFIX.to_owned(),
            policy,
        }
    }

    /// Replace the entry prefix that selects entries for extraction.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The entry prefix selecting entries for extraction.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The per-file failure policy.
    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    fn record_failure(
        &self,
        entry: String,
        source: std::io::Error,
        report: &mut ExtractionReport,
        console: &mut Console<'_>,
    ) -> Result<(), ExtractionError> {
        match self.policy {
            FailurePolicy::AbortOnFirst => Err(ExtractionError::Entry { entry, source }),
            FailurePolicy::CollectAndContinue => {
                console.failure(format!(
                    "Failed to extract {entry} ({}): {source}",
                    source.kind()
                ));
                report.failed += 1;
                Ok(())
            }
        }
    }
}

impl Default for ZipExtractor {
    fn default() -> Self {
        Self::new(FailurePolicy::default())
    }
}

impl ArchiveExtractor for ZipExtractor {
    fn extract(
        &self,
        archive: &[u8],
        dest_dir: &Utf8Path,
        console: &mut Console<'_>,
    ) -> Result<ExtractionReport, ExtractionError> {
        console.status("Extracting assets from client archive");

        ensure_dir(dest_dir.as_std_path())?;
        let root = fs::canonicalize(dest_dir)?;

        let mut reader = Cursor::new(archive);
        let mut report = ExtractionReport::default();

        while let Some(mut entry) = zip::read::read_zipfile_from_stream(&mut reader)? {
            let name = entry.name().to_owned();
            if !name.starts_with(&self.prefix) {
                continue;
            }

            let dest = resolve_inside(&root, &name)?;
            if entry.is_dir() {
                ensure_dir(&dest)?;
                confine(&root, &dest, &name)?;
                continue;
            }

            let Some(file_name) = dest.file_name().map(ToOwned::to_owned) else {
                return Err(ExtractionError::PathTraversal { path: name });
            };
            let parent = dest.parent().unwrap_or(root.as_path());
            ensure_dir(parent)?;
            let parent = confine(&root, parent, &name)?;
            let dest = parent.join(file_name);

            console.status(format!("Extracting from archive: {name}"));
            let written = fs::File::create(&dest)
                .and_then(|file| copy_stream(&mut entry, BufWriter::new(file)));
            match written {
                Ok(bytes) => {
                    log::debug!("wrote {bytes} bytes to {}", dest.display());
                    report.extracted += 1;
                }
                Err(source) => self.record_failure(name, source, &mut report, console)?,
            }
        }

        Ok(report)
    }
}

/// Resolve relative path `name` against `root`, rejecting absolute paths
/// and any `..` that climbs out of `root`.
///
/// The result is strictly inside `root`; an entry resolving to `root`
/// itself is rejected as well.
pub(crate) fn resolve_inside(root: &Path, name: &str) -> Result<PathBuf, ExtractionError> {
    let traversal = || ExtractionError::PathTraversal {
        path: name.to_owned(),
    };

    let mut resolved = root.to_path_buf();
    let mut depth = 0_usize;
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(traversal());
                }
                resolved.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return Err(traversal()),
        }
    }

    if depth == 0 {
        return Err(traversal());
    }
    Ok(resolved)
}

/// Canonicalize an existing `path` and verify it is still under `root`.
fn confine(root: &Path, path: &Path, name: &str) -> Result<PathBuf, ExtractionError> {
    let canonical = fs::canonicalize(path)?;
    if canonical.starts_with(root) {
        Ok(canonical)
    } else {
        Err(ExtractionError::PathTraversal {
            path: name.to_owned(),
        })
    }
}

/// Create `path` and its parents unless it is already a directory.
fn ensure_dir(path: &Path) -> Result<(), ExtractionError> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|source| ExtractionError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "extraction_tests.rs"]
mod tests;
