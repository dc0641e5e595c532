//! Error types for document parsing.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::FrontmatterError;

/// Errors that can occur when turning a source file into a document record.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not inside a version directory.
    #[error("{path} is not inside a version directory")]
    NoVersion {
        /// Path relative to the content root.
        path: PathBuf,
    },

    /// The file has no usable stem to serve as a slug.
    #[error("cannot derive a slug from {path}")]
    NoSlug {
        /// Path relative to the content root.
        path: PathBuf,
    },

    /// The front-matter block is missing or malformed.
    #[error("{path}: {source}")]
    Frontmatter {
        /// Path relative to the content root.
        path: PathBuf,
        /// Underlying front-matter error.
        source: FrontmatterError,
    },

    /// The front-matter has no `title`.
    #[error("{path}: front-matter has no title")]
    MissingTitle {
        /// Path relative to the content root.
        path: PathBuf,
    },
}
