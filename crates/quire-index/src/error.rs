//! Error types for the quire-index crate.

use std::{io, path::PathBuf};

use quire_document::DocumentError;
use thiserror::Error;

/// Errors that can occur when building, exporting or importing the search index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The content root does not exist or is not a directory.
    #[error("content directory not found: {path}")]
    ContentDirMissing {
        /// Path to the content root.
        path: PathBuf,
    },

    /// An entry under the content root could not be read.
    #[error("failed to read {path}: {source}")]
    Walk {
        /// Path relative to the content root.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A source document could not be turned into a record.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Failed to write an artifact.
    #[error("failed to write {path}: {source}")]
    WriteArtifact {
        /// Path of the artifact.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to serialize an artifact or segment.
    #[error("failed to serialize {name}: {source}")]
    Serialize {
        /// Artifact or segment name.
        name: String,
        /// Underlying serialization error.
        source: serde_json::Error,
    },

    /// A segment payload could not be decoded.
    #[error("corrupt index segment {name}: {source}")]
    CorruptSegment {
        /// Segment name.
        name: String,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// A segment name the index does not know how to replay.
    #[error("unknown index segment: {0}")]
    UnknownSegment(String),
}

impl IndexError {
    /// Creates a `Serialize` error for the named artifact or segment.
    pub(crate) fn serialize(name: &str, source: serde_json::Error) -> Self {
        Self::Serialize {
            name: name.to_string(),
            source,
        }
    }

    /// Creates a `CorruptSegment` error for the named segment.
    pub(crate) fn corrupt_segment(name: &str, source: serde_json::Error) -> Self {
        Self::CorruptSegment {
            name: name.to_string(),
            source,
        }
    }
}
