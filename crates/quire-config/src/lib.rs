//! Configuration system for quire.
//!
//! quire uses TOML configuration files named `.quire.toml`. The nearest file found by walking
//! up the directory tree from the current working directory is loaded; relative paths inside
//! it are resolved against the directory that contains it. Without a configuration file every
//! setting takes its default and paths are resolved against the working directory.

#![warn(missing_docs)]

mod discovery;
mod error;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_file};
pub use error::ConfigError;
pub use parse::{
    RawBuildSettings, RawConfig, RawContentSettings, RawOutputSettings, RawSearchSettings,
    RawSiteSettings, parse_config_file, parse_config_str,
};
pub use resolve::{format_path_for_display, is_url, resolve_base_path, resolve_path};
use serde::{Deserialize, Serialize};
pub use templates::local_template;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level resolved configuration for quire.
#[derive(Debug, Clone)]
pub struct Config {
    /// Content tree settings.
    pub content: ContentSettings,
    /// Artifact output settings.
    pub output: OutputSettings,
    /// Index builder settings.
    pub build: BuildSettings,
    /// Runtime search settings.
    pub search: SearchSettings,
    /// Site settings.
    pub site: SiteSettings,
    /// Directory containing the loaded config file, if one was found.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering the nearest `.quire.toml` from `cwd` upwards.
    ///
    /// Returns the defaults (with paths relative to `cwd`) if no configuration file is found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        match discover_config_file(cwd) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::defaults_in(cwd)),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// Relative paths in the file are resolved against its parent directory.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = parse_config_file(path)?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut config = Self::from_raw(raw, &root)?;
        config.config_root = Some(root);
        Ok(config)
    }

    /// Returns the default configuration with paths resolved against `base`.
    pub fn defaults_in(base: &Path) -> Self {
        let content = ContentSettings::default();
        let output = OutputSettings::default();
        Self {
            content: ContentSettings {
                dir: base.join(&content.dir),
                ..content
            },
            output: OutputSettings {
                dir: base.join(&output.dir),
            },
            build: BuildSettings::default(),
            search: SearchSettings::default(),
            site: SiteSettings::default(),
            config_root: None,
        }
    }

    /// Builds a configuration from a raw parsed file, filling defaults for missing values.
    fn from_raw(raw: RawConfig, base: &Path) -> Result<Self, ConfigError> {
        let defaults = Self::defaults_in(base);

        let raw_content = raw.content.unwrap_or_default();
        let content = ContentSettings {
            dir: match raw_content.dir {
                Some(dir) => resolve_path(&dir, base)?,
                None => defaults.content.dir,
            },
            extensions: match raw_content.extension {
                Some(exts) if !exts.is_empty() => exts
                    .into_iter()
                    .map(|e| e.trim_start_matches('.').to_string())
                    .collect(),
                _ => defaults.content.extensions,
            },
        };

        let raw_output = raw.output.unwrap_or_default();
        let output = OutputSettings {
            dir: match raw_output.dir {
                Some(dir) => resolve_path(&dir, base)?,
                None => defaults.output.dir,
            },
        };

        let raw_build = raw.build.unwrap_or_default();
        let build = BuildSettings {
            on_error: raw_build.on_error.unwrap_or(defaults.build.on_error),
            debounce_ms: raw_build.debounce_ms.unwrap_or(defaults.build.debounce_ms),
        };

        let raw_search = raw.search.unwrap_or_default();
        let search = SearchSettings {
            limit: raw_search.limit.unwrap_or(defaults.search.limit),
            min_query_length: raw_search
                .min_query_length
                .unwrap_or(defaults.search.min_query_length),
            debounce_ms: raw_search.debounce_ms.unwrap_or(defaults.search.debounce_ms),
        };

        let raw_site = raw.site.unwrap_or_default();
        let site = SiteSettings {
            base_path: match raw_site.base_path {
                Some(base_path) => resolve_base_path(&base_path, base)?,
                None => defaults.site.base_path,
            },
        };

        Ok(Self {
            content,
            output,
            build,
            search,
            site,
            config_root: None,
        })
    }

    /// Returns the prefix artifacts should be fetched from.
    ///
    /// An empty `site.base_path` falls back to the output directory. A directory
    /// `site.base_path` has already been resolved against the config file's directory.
    pub fn artifact_base(&self) -> String {
        if self.site.base_path.is_empty() {
            self.output.dir.to_string_lossy().into_owned()
        } else {
            self.site.base_path.clone()
        }
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - A content directory that doesn't exist or isn't a directory
    /// - A content directory without any version subdirectories
    /// - A zero search limit
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same layout as a `.quire.toml` file, with resolved absolute paths.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            content: &self.content,
            output: &self.output,
            build: &self.build,
            search: &self.search,
            site: &self.site,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults_in(Path::new("."))
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Content tree settings.
    content: &'a ContentSettings,
    /// Output settings.
    output: &'a OutputSettings,
    /// Builder settings.
    build: &'a BuildSettings,
    /// Search settings.
    search: &'a SearchSettings,
    /// Site settings.
    site: &'a SiteSettings,
}

/// Where the versioned content tree lives and which files it contains.
#[derive(Debug, Clone, Serialize)]
pub struct ContentSettings {
    /// Root directory of the content tree.
    pub dir: PathBuf,
    /// File extensions (without leading dot) that are treated as documents.
    #[serde(rename = "extension")]
    pub extensions: Vec<String>,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content"),
            extensions: vec![String::from("mdx")],
        }
    }
}

/// Where build artifacts are written.
#[derive(Debug, Clone, Serialize)]
pub struct OutputSettings {
    /// Artifact directory.
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public"),
        }
    }
}

/// How the index builder reacts to a document it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the build before any artifact is written.
    #[default]
    Fail,
    /// Log the document and leave it out of the artifacts.
    Skip,
}

/// Index builder settings.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSettings {
    /// Per-document parse failure policy.
    pub on_error: ErrorPolicy,
    /// Watch-mode debounce window in milliseconds.
    pub debounce_ms: u64,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            on_error: ErrorPolicy::Fail,
            debounce_ms: 200,
        }
    }
}

/// Runtime search settings.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSettings {
    /// Maximum hits collected per searchable field.
    pub limit: usize,
    /// Queries shorter than this (in characters, after trimming) return nothing.
    pub min_query_length: usize,
    /// Debounce window for interactive search input in milliseconds.
    pub debounce_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: 10,
            min_query_length: 2,
            debounce_ms: 200,
        }
    }
}

/// Site settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteSettings {
    /// Prefix for artifact fetches: a directory path or an http(s) URL.
    pub base_path: String,
}
