//! Error types for the quire-content crate.

use std::{io, path::PathBuf};

use quire_index::IndexError;
use thiserror::Error;

/// Errors that can occur while loading content artifacts.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A required artifact does not exist.
    #[error("artifact {name} not found at {location}")]
    Missing {
        /// Artifact file name.
        name: String,
        /// Where it was looked for.
        location: String,
    },

    /// Failed to read an artifact from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the artifact.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The HTTP request for an artifact failed.
    #[error("failed to fetch {url}: {source}")]
    Http {
        /// Requested URL.
        url: String,
        /// Underlying HTTP client error.
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("failed to fetch {url}: HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// An artifact is not valid JSON of the expected shape.
    #[error("failed to parse {name}: {source}")]
    Parse {
        /// Artifact file name.
        name: String,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// The search index could not be rebuilt from its segments.
    #[error(transparent)]
    Index(#[from] IndexError),
}
