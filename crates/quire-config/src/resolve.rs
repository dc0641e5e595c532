//! Path resolution for configured directories.
//!
//! Resolves relative and tilde-prefixed paths to absolute paths, and formats paths for display.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured path.
///
/// Handles three cases:
/// - Tilde paths (`~/docs`) - expanded to home directory
/// - Relative paths (`./content`, `../shared`) - joined onto `base`
/// - Absolute paths - returned as-is
///
/// The path is not required to exist; missing directories are reported by validation.
pub fn resolve_path(path: &str, base: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base.join(expanded))
    }
}

/// Returns true if `base` names an HTTP(S) location rather than a directory.
pub fn is_url(base: &str) -> bool {
    base.starts_with("http://") || base.starts_with("https://")
}

/// Resolves a configured artifact base.
///
/// URLs and the empty string are kept as they are; anything else is a directory and is
/// resolved like any other configured path.
pub fn resolve_base_path(base_path: &str, base: &Path) -> Result<String, ConfigError> {
    if base_path.is_empty() || is_url(base_path) {
        return Ok(base_path.to_string());
    }
    Ok(resolve_path(base_path, base)?.to_string_lossy().into_owned())
}

/// Formats a path relative to `base` when possible, for compact display.
pub fn format_path_for_display(path: &Path, base: Option<&Path>) -> String {
    base.and_then(|b| pathdiff::diff_paths(path, b))
        .filter(|rel| !rel.as_os_str().is_empty() && !rel.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

/// Expands a tilde prefix to the home directory.
///
/// - `~` alone becomes the home directory
/// - `~/foo` becomes home directory joined with `foo`
/// - Paths not starting with `~` are returned unchanged
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
