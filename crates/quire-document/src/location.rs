//! Deriving `version` and `slug` from a file's place in the content tree.

use std::path::{Component, Path};

use crate::DocumentError;

/// Where a document lives: its version partition and its slug within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// First path segment below the content root.
    pub version: String,
    /// Filename stem.
    pub slug: String,
}

impl SourceLocation {
    /// Derives a location from a path relative to the content root.
    ///
    /// The layout is `<version>/<...>/<slug>.<ext>`: intermediate directories are allowed but
    /// do not contribute to the slug. A file directly in the content root has no version.
    pub fn from_relative_path(path: &Path) -> Result<Self, DocumentError> {
        let mut segments = path.components().filter_map(|c| match c {
            Component::Normal(segment) => Some(segment),
            _ => None,
        });

        let first = segments.next();
        if segments.next().is_none() {
            return Err(DocumentError::NoVersion {
                path: path.to_path_buf(),
            });
        }

        let version = first
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| DocumentError::NoVersion {
                path: path.to_path_buf(),
            })?;

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DocumentError::NoSlug {
                path: path.to_path_buf(),
            })?;

        Ok(Self { version, slug })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_and_slug() {
        let loc = SourceLocation::from_relative_path(Path::new("v1.0/intro.mdx")).unwrap();
        assert_eq!(loc.version, "v1.0");
        assert_eq!(loc.slug, "intro");
    }

    #[test]
    fn test_nested_directories_keep_first_segment() {
        let loc =
            SourceLocation::from_relative_path(Path::new("v2.1/guides/audio/surround.mdx")).unwrap();
        assert_eq!(loc.version, "v2.1");
        assert_eq!(loc.slug, "surround");
    }

    #[test]
    fn test_leading_dot_segment_is_ignored() {
        let loc = SourceLocation::from_relative_path(Path::new("./v1/a.mdx")).unwrap();
        assert_eq!(loc.version, "v1");
        assert_eq!(loc.slug, "a");
    }

    #[test]
    fn test_root_file_has_no_version() {
        let err = SourceLocation::from_relative_path(Path::new("index.mdx")).unwrap_err();
        assert!(matches!(err, DocumentError::NoVersion { .. }));
    }

    #[test]
    fn test_multiple_dots_in_name() {
        let loc = SourceLocation::from_relative_path(Path::new("v1/release.notes.mdx")).unwrap();
        assert_eq!(loc.slug, "release.notes");
    }
}
