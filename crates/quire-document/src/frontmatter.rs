//! YAML front-matter parsing for content documents.
//!
//! Front-matter is required metadata at the start of a document, delimited by `---`:
//!
//! ```markdown
//! ---
//! title: Surround Sound
//! category: Guide
//! navOrder: 2
//! ---
//!
//! Body starts here
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Parsed front-matter from a document.
///
/// Known keys are typed; everything else is kept in `extra` so new keys pass through
/// the builder without code changes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Frontmatter {
    /// Document title.
    pub title: Option<String>,
    /// Document description.
    pub description: Option<String>,
    /// Navigation order within the category.
    #[serde(rename = "navOrder")]
    pub nav_order: Option<f64>,
    /// Navigation category.
    pub category: Option<String>,
    /// Unknown keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reasons a front-matter block can't be used.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// The document doesn't start with a `---` delimited block.
    #[error("missing front-matter block")]
    Missing,

    /// The block is not valid YAML or doesn't have the expected shape.
    #[error("malformed front-matter: {0}")]
    Malformed(#[from] serde_yaml::Error),
}

/// Splits a document into its raw front-matter block and the body that follows.
///
/// Returns `None` if the content doesn't start with a `---` line or the block is never
/// closed. The body excludes the closing delimiter and one blank line after it.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start_matches('\u{feff}'); // Strip BOM if present
    let after_opening = content.strip_prefix("---")?;
    let after_opening = after_opening
        .strip_prefix("\r\n")
        .or_else(|| after_opening.strip_prefix('\n'))?;

    let closing_pos = find_closing_delimiter(after_opening)?;
    let yaml = &after_opening[..closing_pos];
    let remaining = &after_opening[closing_pos + 3..];

    // Skip the rest of the delimiter line, then one blank line if present
    let remaining = strip_line_ending(remaining);
    let remaining = strip_line_ending(remaining);

    Some((yaml, remaining))
}

/// Parses the front-matter of a document.
///
/// Returns the parsed front-matter and the body after it. Unlike a lenient reader, a
/// missing or malformed block is an error: every document must declare its header.
pub fn parse_frontmatter(content: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let (yaml, body) = split_frontmatter(content).ok_or(FrontmatterError::Missing)?;
    if yaml.trim().is_empty() {
        return Ok((Frontmatter::default(), body));
    }
    let frontmatter = serde_yaml::from_str::<Frontmatter>(yaml)?;
    Ok((frontmatter, body))
}

/// Finds the byte offset of the closing `---` delimiter.
///
/// The delimiter must be alone on its line (trailing whitespace and `\r` allowed).
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    for line in content.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(pos);
        }
        pos += line.len();
    }
    None
}

/// Removes a single leading line ending (`\n` or `\r\n`).
fn strip_line_ending(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}
