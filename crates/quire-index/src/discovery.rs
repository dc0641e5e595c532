//! Source file discovery for the index builder.
//!
//! Walks the content root to find document files and returns them in a reproducible order.
//!
//! Hidden entries (names starting with `.`) are skipped. Symlinks are never followed: a
//! symlinked directory is not descended into and a symlinked file is not a document. Entries
//! the walk cannot read are collected rather than dropped, so the builder can apply its
//! error policy to them.

use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::IndexError;

/// A source file discovered for building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path to the file.
    pub abs_path: PathBuf,
    /// Path relative to the content root.
    pub rel_path: PathBuf,
}

/// An entry under the content root that the walk could not read.
#[derive(Debug)]
pub struct UnreadableEntry {
    /// Path relative to the content root, or the root itself if the walk failed there.
    pub rel_path: PathBuf,
    /// Why the entry couldn't be read.
    pub error: io::Error,
}

impl UnreadableEntry {
    /// Converts this entry into the error a failing build reports.
    pub fn into_error(self) -> IndexError {
        IndexError::Walk {
            path: self.rel_path,
            source: self.error,
        }
    }
}

/// The result of walking the content root.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Document files, sorted by relative path.
    pub files: Vec<DiscoveredFile>,
    /// Entries that could not be read, in walk order.
    pub unreadable: Vec<UnreadableEntry>,
}

/// Discovers all document files under `root`.
///
/// Returns regular files whose extension is one of `extensions` (compared without the
/// leading dot, case-insensitively), sorted by relative path. Entries that cannot be read
/// are returned in [`Discovery::unreadable`]; a directory that can't be listed contributes
/// none of its files.
pub fn discover_files(root: &Path, extensions: &[String]) -> Result<Discovery, IndexError> {
    if !root.is_dir() {
        return Err(IndexError::ContentDirMissing {
            path: root.to_path_buf(),
        });
    }

    let mut discovery = Discovery::default();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let rel_path = e
                    .path()
                    .and_then(|p| p.strip_prefix(root).ok())
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                warn!(path = %rel_path.display(), error = %e, "unreadable entry in content tree");
                discovery.unreadable.push(UnreadableEntry {
                    rel_path,
                    error: e.into(),
                });
                continue;
            }
        };

        if entry.path_is_symlink() {
            debug!(path = %entry.path().display(), "not following symlink");
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let abs_path = entry.path().to_path_buf();
        if !has_extension(&abs_path, extensions) {
            continue;
        }

        let rel_path = match abs_path.strip_prefix(root) {
            Ok(p) => p.to_path_buf(),
            Err(_) => continue,
        };

        discovery.files.push(DiscoveredFile { abs_path, rel_path });
    }

    discovery
        .files
        .sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    Ok(discovery)
}

/// Checks if a filename represents a hidden file (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

/// Checks whether `path` has one of the given extensions.
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn mdx() -> Vec<String> {
        vec!["mdx".to_string()]
    }

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "---\ntitle: T\n---\n").unwrap();
    }

    fn rel_paths(files: &[DiscoveredFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.rel_path.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn discover_files_sorted_by_relative_path() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "v2.0/setup.mdx");
        write(temp.path(), "v1.0/setup.mdx");
        write(temp.path(), "v1.0/intro.mdx");
        write(temp.path(), "v1.0/guides/audio.mdx");

        let files = discover_files(temp.path(), &mdx()).unwrap().files;

        assert_eq!(
            rel_paths(&files),
            vec![
                "v1.0/guides/audio.mdx",
                "v1.0/intro.mdx",
                "v1.0/setup.mdx",
                "v2.0/setup.mdx"
            ]
        );
        assert!(files.iter().all(|f| f.abs_path.starts_with(temp.path())));
    }

    #[test]
    fn discover_files_filters_extension() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "v1/a.mdx");
        write(temp.path(), "v1/b.md");
        write(temp.path(), "v1/c.MDX");
        write(temp.path(), "v1/notes.txt");

        let files = discover_files(temp.path(), &mdx()).unwrap().files;
        assert_eq!(rel_paths(&files), vec!["v1/a.mdx", "v1/c.MDX"]);

        let both = vec!["md".to_string(), "mdx".to_string()];
        let files = discover_files(temp.path(), &both).unwrap().files;
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn discover_files_skips_hidden_entries() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "v1/.draft.mdx");
        write(temp.path(), ".cache/v1/page.mdx");
        write(temp.path(), "v1/visible.mdx");

        let files = discover_files(temp.path(), &mdx()).unwrap().files;
        assert_eq!(rel_paths(&files), vec!["v1/visible.mdx"]);
    }

    #[cfg(unix)]
    #[test]
    fn discover_files_skips_symlinks() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        write(temp.path(), "v1/real.mdx");
        symlink(temp.path().join("v1/real.mdx"), temp.path().join("v1/alias.mdx")).unwrap();
        symlink(temp.path().join("v1"), temp.path().join("v2")).unwrap();

        let discovery = discover_files(temp.path(), &mdx()).unwrap();
        assert_eq!(rel_paths(&discovery.files), vec!["v1/real.mdx"]);
        assert!(discovery.unreadable.is_empty());
    }

    #[test]
    fn discover_files_empty_root() {
        let temp = TempDir::new().unwrap();
        let discovery = discover_files(temp.path(), &mdx()).unwrap();
        assert!(discovery.files.is_empty());
        assert!(discovery.unreadable.is_empty());
    }

    #[test]
    fn discover_files_missing_root() {
        let temp = TempDir::new().unwrap();
        let err = discover_files(&temp.path().join("missing"), &mdx()).unwrap_err();
        assert!(matches!(err, IndexError::ContentDirMissing { .. }));
    }
}
