//! Document model and front-matter parsing for quire.
//!
//! This crate turns a versioned source file into the records the build artifacts carry.
//! It handles:
//! - YAML front-matter extraction with typed known keys and an open map for the rest
//! - Deriving `version` and `slug` from a file's location in the content tree
//! - In-page outline (table of contents) extraction from document bodies

#![warn(missing_docs)]

mod error;
mod frontmatter;
mod location;
mod outline;
mod parse;

use std::fmt;

pub use error::DocumentError;
pub use frontmatter::{Frontmatter, FrontmatterError, parse_frontmatter, split_frontmatter};
pub use location::SourceLocation;
pub use outline::{OutlineEntry, extract_outline, outline_id};
pub use parse::{ParsedDocument, parse_document, read_document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Category bucket used for documents that don't declare one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Front-matter keys that are derived by the builder and cannot be overridden.
pub const RESERVED_KEYS: &[&str] = &["id", "slug", "version", "content"];

/// Corpus-wide numeric document identifier.
///
/// Assigned sequentially from 0 in file-scan order; it is the join key between the
/// metadata and full-content artifacts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DocumentId(pub u32);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DocumentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// One versioned article, as carried by the metadata and full-content artifacts.
///
/// Serializes to `{id, slug, version, title, description?, navOrder?, category?, ...extra,
/// content?}`. Unknown front-matter keys live in `extra` and are written back at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Corpus-wide identifier.
    pub id: DocumentId,
    /// Filename stem; unique within a version.
    pub slug: String,
    /// First path segment below the content root.
    pub version: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Optional summary line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Placement hint within the category; lower sorts first.
    #[serde(rename = "navOrder", default, skip_serializing_if = "Option::is_none")]
    pub nav_order: Option<f64>,
    /// Navigation bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Every other front-matter key, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Raw source text; only present in the full-content artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Document {
    /// Returns the navigation category, falling back to [`DEFAULT_CATEGORY`].
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Returns the raw content, or an empty string when it was not loaded.
    pub fn content_or_empty(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Returns a copy of this document carrying `content`.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..self.clone()
        }
    }

    /// Extracts the in-page outline from this document's content.
    ///
    /// Returns an empty outline when the content is unavailable.
    pub fn outline(&self) -> Vec<OutlineEntry> {
        match &self.content {
            Some(content) => extract_outline(content),
            None => Vec::new(),
        }
    }
}
