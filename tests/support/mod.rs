//! Shared test support for behaviour suites.
//!
//! Provides a URL-routed stub [`Fetcher`] and a builder for the set of
//! documents a complete run fetches, so scenarios can adjust a single route
//! (drop the asset index, swap the archive) without restating the rest.

use mcasset_extractor::fetch::{FetchError, Fetcher};
use mcasset_extractor::test_utils::{
    ArchiveEntry, asset_index_json, version_info_json, version_manifest_json, zip_archive,
};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::{Mutex, PoisonError};

/// Version manifest location served by [`published_release`].
pub const MANIFEST_URL: &str = "https://meta.example.test/mc/game/version_manifest.json";
/// Object store base served by [`published_release`].
pub const OBJECTS_URL: &str = "https://objects.example.test";
/// Client archive location served by [`published_release`].
pub const CLIENT_URL: &str = "https://meta.example.test/client.jar";
/// Asset index location served by [`published_release`].
pub const INDEX_URL: &str = "https://meta.example.test/indexes/5.json";

/// Fetcher serving fixed bodies by URL; any other URL is a 404.
#[derive(Default)]
pub struct StubFetcher {
    routes: HashMap<String, Vec<u8>>,
    requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    /// Create a fetcher serving `routes`.
    pub fn new(routes: HashMap<String, Vec<u8>>) -> Self {
        Self {
            routes,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Every URL opened so far, in request order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Fetcher for StubFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read>, FetchError> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_owned());
        match self.routes.get(url) {
            Some(body) => Ok(Box::new(Cursor::new(body.clone()))),
            None => Err(FetchError::NotFound {
                url: url.to_owned(),
            }),
        }
    }
}

/// Object store URL for `hash` under [`OBJECTS_URL`].
pub fn object_route(hash: &str) -> String {
    let shard = hash.get(..2).unwrap_or_else(|| panic!("hash {hash} is shorter than a shard"));
    format!("{OBJECTS_URL}/{shard}/{hash}")
}

/// Routes for one published release `id` that is also the latest release.
///
/// The client archive carries `archive` and the asset index lists `objects`
/// as `(logical path, hash, body)`; each object body is served from the
/// object store.
pub fn published_release(
    id: &str,
    archive: &[ArchiveEntry<'_>],
    objects: &[(&str, &str, &[u8])],
) -> HashMap<String, Vec<u8>> {
    let info_url = format!("https://meta.example.test/v1/packages/{id}.json");
    let index: Vec<(&str, &str)> = objects.iter().map(|(path, hash, _)| (*path, *hash)).collect();

    let mut routes = HashMap::from([
        (
            MANIFEST_URL.to_owned(),
            version_manifest_json(id, id, &[(id, info_url.as_str())]).into_bytes(),
        ),
        (
            info_url.clone(),
            version_info_json(CLIENT_URL, INDEX_URL).into_bytes(),
        ),
        (
            CLIENT_URL.to_owned(),
            zip_archive(archive).unwrap_or_else(|err| panic!("fixture archive: {err}")),
        ),
        (INDEX_URL.to_owned(), asset_index_json(&index).into_bytes()),
    ]);
    for (_, hash, body) in objects {
        routes.insert(object_route(hash), body.to_vec());
    }
    routes
}
