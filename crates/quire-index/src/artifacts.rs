//! Build artifacts: names, rendering and writing.
//!
//! A build produces three JSON files side by side in the output directory:
//! - `content-meta.json` - metadata records, no content
//! - `content-full.json` - the same records with the raw source text
//! - `search-index.json` - the exported search index segments

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{BuildOutput, IndexError};

/// File name of the metadata artifact.
pub const METADATA_ARTIFACT: &str = "content-meta.json";

/// File name of the full-content artifact.
pub const FULL_CONTENT_ARTIFACT: &str = "content-full.json";

/// File name of the search-index artifact.
pub const SEARCH_INDEX_ARTIFACT: &str = "search-index.json";

/// All artifact file names, in load order.
pub const ARTIFACT_NAMES: [&str; 3] = [
    METADATA_ARTIFACT,
    FULL_CONTENT_ARTIFACT,
    SEARCH_INDEX_ARTIFACT,
];

/// Renders every artifact to pretty-printed JSON.
///
/// Returns `(file name, contents)` pairs in [`ARTIFACT_NAMES`] order.
pub fn render_artifacts(output: &BuildOutput) -> Result<Vec<(&'static str, String)>, IndexError> {
    let segments = output.index.export()?;
    Ok(vec![
        (METADATA_ARTIFACT, render(METADATA_ARTIFACT, &output.metadata)?),
        (
            FULL_CONTENT_ARTIFACT,
            render(FULL_CONTENT_ARTIFACT, &output.full)?,
        ),
        (SEARCH_INDEX_ARTIFACT, render(SEARCH_INDEX_ARTIFACT, &segments)?),
    ])
}

/// Writes every artifact into `dir`, creating it if needed.
///
/// All artifacts are rendered before the first file is touched, so a serialization failure
/// leaves the directory as it was. Returns the paths written.
pub fn write_artifacts(dir: &Path, output: &BuildOutput) -> Result<Vec<PathBuf>, IndexError> {
    let rendered = render_artifacts(output)?;

    fs::create_dir_all(dir).map_err(|source| IndexError::WriteArtifact {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(rendered.len());
    for (name, contents) in rendered {
        let path = dir.join(name);
        fs::write(&path, contents).map_err(|source| IndexError::WriteArtifact {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}

/// Presence of one artifact on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStatus {
    /// Artifact file name.
    pub name: &'static str,
    /// Full path of the artifact.
    pub path: PathBuf,
    /// Size in bytes, or `None` if the file doesn't exist.
    pub size: Option<u64>,
}

/// Reports which artifacts exist in `dir`.
pub fn artifact_status(dir: &Path) -> Vec<ArtifactStatus> {
    ARTIFACT_NAMES
        .into_iter()
        .map(|name| {
            let path = dir.join(name);
            let size = fs::metadata(&path)
                .ok()
                .filter(|m| m.is_file())
                .map(|m| m.len());
            ArtifactStatus { name, path, size }
        })
        .collect()
}

/// Serializes one artifact.
fn render<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<String, IndexError> {
    serde_json::to_string_pretty(value).map_err(|e| IndexError::serialize(name, e))
}
