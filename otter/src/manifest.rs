//! On-disk form of a build (C8's definition list plus [`BuildConfig`]).
//!
//! The original `#include`-time C arrays this engine was modelled on
//! are not expressible in a Rust binary's command-line surface; a JSON
//! manifest is the natural equivalent, deserialised straight into the
//! types `otter-core` already works with.

use {
    otter_core::definition::{BuildConfig, TargetDefinition},
    serde::Deserialize,
    std::{fs, path::Path},
    thiserror::Error,
};

/// A full build, as read from a manifest file.
#[derive(Deserialize)]
pub struct Manifest
{
    /// Path and flag configuration.
    pub config: BuildConfig,

    /// Target definitions, in declaration order.
    pub targets: Vec<TargetDefinition>,
}

/// Error reading or parsing a manifest file.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ManifestError
{
    #[error("failed to read manifest {0:?}: {1}")]
    Io(std::path::PathBuf, #[source] std::io::Error),

    #[error("failed to parse manifest {0:?}: {1}")]
    Parse(std::path::PathBuf, #[source] serde_json::Error),
}

/// Load and parse a manifest from `path`.
pub fn load(path: &Path) -> Result<Manifest, ManifestError>
{
    let text = fs::read_to_string(path)
        .map_err(|err| ManifestError::Io(path.to_owned(), err))?;
    serde_json::from_str(&text)
        .map_err(|err| ManifestError::Parse(path.to_owned(), err))
}
