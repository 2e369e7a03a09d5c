//! Fixture builders shared by unit and integration tests.

use serde_json::{Map, Value, json};
use std::io::{Cursor, Write};
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;

/// One entry of a fixture archive.
#[derive(Debug, Clone, Copy)]
pub enum ArchiveEntry<'a> {
    /// A file entry with its content.
    File(&'a str, &'a [u8]),
    /// A directory entry.
    Dir(&'a str),
}

/// Build an in-memory zip archive containing `entries` in order.
///
/// # Errors
///
/// Returns an error if the zip writer rejects an entry.
pub fn zip_archive(entries: &[ArchiveEntry<'_>]) -> ZipResult<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for entry in entries {
        match *entry {
            ArchiveEntry::File(name, content) => {
                writer.start_file(name, options)?;
                writer.write_all(content)?;
            }
            ArchiveEntry::Dir(name) => writer.add_directory(name, options)?,
        }
    }

    Ok(writer.finish()?.into_inner())
}

/// Render a version manifest document.
///
/// `versions` lists `(id, url)` pairs in manifest order.
#[must_use]
pub fn version_manifest_json(release: &str, snapshot: &str, versions: &[(&str, &str)]) -> String {
    let versions: Vec<Value> = versions
        .iter()
        .map(|(id, url)| json!({ "id": id, "type": "release", "url": url }))
        .collect();
    json!({
        "latest": { "release": release, "snapshot": snapshot },
        "versions": versions,
    })
    .to_string()
}

/// Render a version-info document pointing at the given client archive and
/// asset index.
#[must_use]
pub fn version_info_json(client_url: &str, asset_index_url: &str) -> String {
    json!({
        "downloads": { "client": { "url": client_url, "size": 0 } },
        "assetIndex": { "id": "test", "url": asset_index_url },
    })
    .to_string()
}

/// Render an asset index document from `(logical path, hash)` pairs.
#[must_use]
pub fn asset_index_json(objects: &[(&str, &str)]) -> String {
    let objects: Map<String, Value> = objects
        .iter()
        .map(|(path, hash)| ((*path).to_owned(), json!({ "hash": hash, "size": 1 })))
        .collect();
    json!({ "objects": objects }).to_string()
}
