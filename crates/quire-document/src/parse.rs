//! High-level document parsing API.
//!
//! Turns the raw text of one source file into its metadata record plus the body text that
//! feeds the search index.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::{
    Document, DocumentError, DocumentId, RESERVED_KEYS, SourceLocation, parse_frontmatter,
};

/// Result of parsing one source file.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Metadata record, without content.
    pub document: Document,
    /// Entire raw file text, front-matter included.
    pub raw: String,
    /// Body text after the front-matter block.
    pub body: String,
}

impl ParsedDocument {
    /// Returns the full-content record: the metadata plus the raw file text.
    pub fn full_record(&self) -> Document {
        self.document.with_content(self.raw.as_str())
    }
}

/// Parses a document's raw text.
///
/// # Arguments
/// * `raw` - The entire file text
/// * `path` - Path relative to the content root; determines `version` and `slug`
/// * `id` - Identifier assigned by the caller
pub fn parse_document(
    raw: &str,
    path: &Path,
    id: DocumentId,
) -> Result<ParsedDocument, DocumentError> {
    let location = SourceLocation::from_relative_path(path)?;
    let (frontmatter, body) =
        parse_frontmatter(raw).map_err(|source| DocumentError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?;

    let title = frontmatter
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| DocumentError::MissingTitle {
            path: path.to_path_buf(),
        })?;

    let mut extra = frontmatter.extra;
    for key in RESERVED_KEYS {
        if extra.remove(*key).is_some() {
            warn!(path = %path.display(), key = *key, "ignoring reserved front-matter key");
        }
    }

    let document = Document {
        id,
        slug: location.slug,
        version: location.version,
        title,
        description: frontmatter.description,
        nav_order: frontmatter.nav_order,
        category: frontmatter.category,
        extra,
        content: None,
    };

    Ok(ParsedDocument {
        document,
        raw: raw.to_string(),
        body: body.to_string(),
    })
}

/// Reads and parses a document from disk.
///
/// `root` is the content root; `relative` is the file's path below it.
pub fn read_document(
    root: &Path,
    relative: &Path,
    id: DocumentId,
) -> Result<ParsedDocument, DocumentError> {
    let full_path: PathBuf = root.join(relative);
    let raw = fs::read_to_string(&full_path).map_err(|source| DocumentError::ReadFile {
        path: full_path.clone(),
        source,
    })?;
    parse_document(&raw, relative, id)
}
