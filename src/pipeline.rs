//! Sequential asset extraction pipeline.
//!
//! Runs the phases strictly in order: resolve the version, fetch its
//! version-info document, download and extract the client archive, fetch the
//! asset index, and download every indexed object. The first fatal failure
//! ends the run; per-item failures are only counted.

use crate::asset_index::fetch_asset_index;
use crate::config::Endpoints;
use crate::download::{DownloadReport, ObjectDownloader};
use crate::error::{ExtractorError, Result};
use crate::extraction::{ArchiveExtractor, ExtractionReport, ZipExtractor};
use crate::fetch::{Fetcher, UreqFetcher, fetch_bytes};
use crate::manifest::{VersionLabel, resolve_version};
use crate::output::Console;
use crate::version_info::fetch_version_info;
use camino::Utf8Path;
use std::fmt;

/// Inputs for one pipeline run.
#[derive(Debug)]
pub struct PipelineConfig<'a> {
    /// The version label given on the command line.
    pub version: &'a VersionLabel,
    /// Output directory; must not exist yet.
    pub destination: &'a Utf8Path,
    /// Remote locations to fetch from.
    pub endpoints: &'a Endpoints,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// The version id the label resolved to.
    pub version: String,
    /// Counts from the client archive phase.
    pub extraction: ExtractionReport,
    /// Counts from the bulk object phase.
    pub download: DownloadReport,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Summary:")?;
        writeln!(
            f,
            "Extracted {} assets from client archive ({} failed)",
            self.extraction.extracted, self.extraction.failed
        )?;
        write!(
            f,
            "Downloaded {} assets from object store ({} failed, {} skipped)",
            self.download.downloaded, self.download.failed, self.download.skipped
        )
    }
}

/// Run the pipeline with the production HTTP fetcher and zip extractor.
///
/// # Errors
///
/// Returns the first fatal [`ExtractorError`] encountered.
pub fn run_pipeline(config: &PipelineConfig<'_>, console: &mut Console<'_>) -> Result<Summary> {
    run_pipeline_with(config, &UreqFetcher, &ZipExtractor::default(), console)
}

/// Run the pipeline with injected fetcher and extractor.
///
/// The destination is checked before any request is made, so an existing
/// directory fails the run without network traffic.
///
/// # Errors
///
/// Returns [`ExtractorError::DestinationExists`] if the destination is
/// present, and the phase-specific variant for any later fatal failure.
pub fn run_pipeline_with(
    config: &PipelineConfig<'_>,
    fetcher: &dyn Fetcher,
    extractor: &dyn ArchiveExtractor,
    console: &mut Console<'_>,
) -> Result<Summary> {
    let destination = config.destination;
    if destination.exists() {
        return Err(ExtractorError::DestinationExists {
            path: destination.to_path_buf(),
        });
    }

    let resolved = resolve_version(
        fetcher,
        &config.endpoints.version_manifest_url,
        config.version,
        console,
    )?;

    let info = fetch_version_info(fetcher, &resolved.url)?;

    console.status("Downloading client archive");
    let archive =
        fetch_bytes(fetcher, info.client_url()).map_err(ExtractorError::ClientDownload)?;

    let extraction = extractor.extract(&archive, destination, console)?;
    drop(archive);

    console.status("Downloading asset index");
    let index = fetch_asset_index(fetcher, info.asset_index_url())?;
    log::debug!("asset index lists {} objects", index.objects.len());

    let downloader = ObjectDownloader::new(fetcher, &config.endpoints.resources_base_url);
    let download = downloader.download_all(&index, destination, console);

    let summary = Summary {
        version: resolved.id,
        extraction,
        download,
    };
    console.status(&summary);
    Ok(summary)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
