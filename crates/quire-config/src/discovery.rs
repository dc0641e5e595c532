//! Configuration file discovery.
//!
//! Finds the nearest `.quire.toml` by walking up the directory tree from a starting point.

use std::path::{Path, PathBuf};

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".quire.toml";

/// Returns the closest `.quire.toml` at or above `cwd`.
///
/// Returns `None` if no configuration file exists between `cwd` and the filesystem root.
pub fn discover_config_file(cwd: &Path) -> Option<PathBuf> {
    let mut current = Some(cwd);
    while let Some(dir) = current {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            return Some(config_path);
        }
        current = dir.parent();
    }
    None
}
