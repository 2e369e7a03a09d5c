//! CLI argument definitions for the asset extractor.
//!
//! The interface is deliberately small: a version label and a destination
//! directory, both required and positional.

use crate::manifest::VersionLabel;
use camino::Utf8PathBuf;
use clap::Parser;

/// Extract the asset tree of a game version.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "mcasset-extractor")]
#[command(version, about)]
#[command(long_about = concat!(
    "Extract the asset tree of a game version.\n\n",
    "Resolves the version against the public version manifest, unpacks the ",
    "`assets` entries of its client archive, then downloads every object ",
    "listed in its asset index into the same tree.",
))]
#[command(after_help = concat!(
    "VERSION LABELS:\n",
    "  latest             The newest stable release\n",
    "  latest-snapshot    The newest snapshot build\n",
    "  <id>               An exact version id, e.g. 1.20.1 or 23w31a\n\n",
    "EXAMPLES:\n",
    "  Extract the newest release:\n",
    "    $ mcasset-extractor latest ./assets-latest\n\n",
    "  Extract a specific version:\n",
    "    $ mcasset-extractor 1.20.1 ./assets-1.20.1",
))]
pub struct Cli {
    /// Version label: `latest`, `latest-snapshot`, or an exact version id.
    #[arg(value_name = "VERSION")]
    pub label: String,

    /// Output directory; must not already exist.
    #[arg(value_name = "DESTINATION")]
    pub destination: Utf8PathBuf,
}

impl Cli {
    /// The `VERSION` argument as a [`VersionLabel`].
    #[must_use]
    pub fn version_label(&self) -> VersionLabel {
        VersionLabel::from(self.label.as_str())
    }
}
