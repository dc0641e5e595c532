//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, fs};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The content directory does not exist.
    ContentDirMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The content directory exists but is not a directory.
    ContentDirNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// The content directory has no version subdirectories.
    NoVersionDirectories {
        /// The content directory.
        path: String,
    },
    /// The search limit is zero, so every search returns nothing.
    ZeroSearchLimit,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContentDirMissing { path } => {
                write!(f, "content directory does not exist: {path}")
            }
            Self::ContentDirNotDirectory { path } => {
                write!(f, "content path is not a directory: {path}")
            }
            Self::NoVersionDirectories { path } => {
                write!(f, "content directory has no version subdirectories: {path}")
            }
            Self::ZeroSearchLimit => write!(f, "search.limit is 0; searches will return nothing"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let dir = &config.content.dir;
    let path = dir.display().to_string();

    if !dir.exists() {
        warnings.push(ConfigWarning::ContentDirMissing { path });
    } else if !dir.is_dir() {
        warnings.push(ConfigWarning::ContentDirNotDirectory { path });
    } else {
        let has_version_dir = fs::read_dir(dir).is_ok_and(|entries| {
            entries
                .filter_map(Result::ok)
                .any(|e| e.path().is_dir() && !e.file_name().to_string_lossy().starts_with('.'))
        });
        if !has_version_dir {
            warnings.push(ConfigWarning::NoVersionDirectories { path });
        }
    }

    if config.search.limit == 0 {
        warnings.push(ConfigWarning::ZeroSearchLimit);
    }

    warnings
}
