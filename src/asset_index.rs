//! Asset index model and content hash newtype.
//!
//! The asset index maps logical asset paths (e.g. `minecraft/sounds/click.ogg`)
//! to content-addressed objects. An object's hash both names it and selects
//! the shard directory it is stored under remotely.

use crate::error::{ExtractorError, Result};
use crate::fetch::{Fetcher, fetch_json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of leading hash characters that form the shard directory.
const SHARD_LEN: usize = 2;

/// The asset index document for one version.
///
/// Objects are kept in a sorted map, so iteration visits logical paths in
/// lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetIndex {
    /// Logical asset path to object descriptor.
    pub objects: BTreeMap<String, AssetObject>,
}

/// Descriptor of one content-addressed object.
///
/// The hash is kept as published and validated per object when it is
/// downloaded, so one malformed entry never rejects the whole index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetObject {
    /// Hex-encoded content digest, as published.
    pub hash: String,
    /// Declared size in bytes.
    #[serde(default)]
    pub size: u64,
}

/// Errors arising from invalid content hashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetHashError {
    /// The hash is too short to carry a shard prefix.
    #[error("asset hash \"{value}\" is too short to carry a shard prefix")]
    TooShort {
        /// The rejected hash.
        value: String,
    },

    /// The hash contains a non-hexadecimal character.
    #[error("asset hash \"{value}\" contains non-hex character '{bad}'")]
    NonHex {
        /// The rejected hash.
        value: String,
        /// The first offending character.
        bad: char,
    },
}

/// A validated hex-encoded content hash.
///
/// # Examples
///
/// ```
/// use mcasset_extractor::asset_index::AssetHash;
///
/// let hash = AssetHash::try_from("abcdef0123").expect("valid hash");
/// assert_eq!(hash.shard(), "ab");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetHash(String);

impl AssetObject {
    /// Validate the published hash.
    ///
    /// # Errors
    ///
    /// Returns [`AssetHashError`] if the hash is too short or not hex.
    pub fn validated_hash(&self) -> std::result::Result<AssetHash, AssetHashError> {
        AssetHash::try_from(self.hash.as_str())
    }
}

impl AssetHash {
    /// Return the hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the shard directory: the first two characters of the hash.
    #[must_use]
    pub fn shard(&self) -> &str {
        self.0.get(..SHARD_LEN).unwrap_or(self.0.as_str())
    }
}

impl TryFrom<&str> for AssetHash {
    type Error = AssetHashError;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        validate_hash(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for AssetHash {
    type Error = AssetHashError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        validate_hash(&value)?;
        Ok(Self(value))
    }
}

impl From<AssetHash> for String {
    fn from(hash: AssetHash) -> Self {
        hash.0
    }
}

impl AsRef<str> for AssetHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_hash(value: &str) -> std::result::Result<(), AssetHashError> {
    if value.len() < SHARD_LEN {
        return Err(AssetHashError::TooShort {
            value: value.to_owned(),
        });
    }
    if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(AssetHashError::NonHex {
            value: value.to_owned(),
            bad,
        });
    }
    Ok(())
}

/// Fetch and parse the asset index at `url`.
///
/// # Errors
///
/// Returns [`ExtractorError::AssetIndexDownload`] on any network or parse
/// failure.
pub fn fetch_asset_index(fetcher: &dyn Fetcher, url: &str) -> Result<AssetIndex> {
    fetch_json(fetcher, url).map_err(ExtractorError::AssetIndexDownload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn shard_is_first_two_characters() {
        let hash = AssetHash::try_from("bdf48ef6b5d0d23bbb02e17d04865216179f510a").expect("valid");
        assert_eq!(hash.shard(), "bd");
    }

    #[test]
    fn two_character_hash_is_its_own_shard() {
        let hash = AssetHash::try_from("ab").expect("valid");
        assert_eq!(hash.shard(), "ab");
    }

    #[rstest]
    #[case::empty("")]
    #[case::single("a")]
    fn rejects_hashes_without_shard(#[case] value: &str) {
        let result = AssetHash::try_from(value);
        assert!(matches!(result, Err(AssetHashError::TooShort { .. })));
    }

    #[rstest]
    #[case::path_separator("ab/../cd")]
    #[case::letter_outside_hex("abcg")]
    #[case::whitespace("ab cd")]
    fn rejects_non_hex_hashes(#[case] value: &str) {
        let result = AssetHash::try_from(value);
        assert!(matches!(result, Err(AssetHashError::NonHex { .. })));
    }

    #[test]
    fn parses_objects_in_sorted_order() {
        let json = r#"{"objects":{
            "sounds/z.ogg":{"hash":"ff00","size":3},
            "icons/a.png":{"hash":"0a0b","size":1},
            "lang/en_us.json":{"hash":"1234","size":2}
        }}"#;
        let index: AssetIndex = serde_json::from_str(json).expect("valid index");
        let keys: Vec<&str> = index.objects.keys().map(String::as_str).collect();
        assert_eq!(keys, ["icons/a.png", "lang/en_us.json", "sounds/z.ogg"]);
    }

    #[test]
    fn malformed_hash_is_kept_for_per_object_validation() {
        let json = r#"{"objects":{
            "a.png":{"hash":"zz00","size":1},
            "b.png":{"hash":"abcd","size":1}
        }}"#;
        let index: AssetIndex = serde_json::from_str(json).expect("index still parses");
        assert_eq!(index.objects.len(), 2);

        let bad = index.objects.get("a.png").expect("listed");
        assert!(matches!(
            bad.validated_hash(),
            Err(AssetHashError::NonHex { bad: 'z', .. })
        ));
        let good = index.objects.get("b.png").expect("listed");
        assert_eq!(good.validated_hash().expect("valid").shard(), "ab");
    }
}
