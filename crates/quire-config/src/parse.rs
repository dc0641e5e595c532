//! Configuration file parsing.
//!
//! Parses a `.quire.toml` file into an intermediate `RawConfig` structure that preserves
//! the optional nature of every field before defaults are applied.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::{ConfigError, ErrorPolicy};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional; missing values take their defaults during resolution.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Content tree section.
    pub content: Option<RawContentSettings>,
    /// Output section.
    pub output: Option<RawOutputSettings>,
    /// Builder section.
    pub build: Option<RawBuildSettings>,
    /// Search section.
    pub search: Option<RawSearchSettings>,
    /// Site section.
    pub site: Option<RawSiteSettings>,
}

/// Raw content tree settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawContentSettings {
    /// Content root, relative to the config file.
    pub dir: Option<String>,
    /// Document extension(s). Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub extension: Option<Vec<String>>,
}

/// Raw output settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOutputSettings {
    /// Artifact directory, relative to the config file.
    pub dir: Option<String>,
}

/// Raw builder settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBuildSettings {
    /// Per-document parse failure policy.
    pub on_error: Option<ErrorPolicy>,
    /// Watch-mode debounce window in milliseconds.
    pub debounce_ms: Option<u64>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Maximum hits per searchable field.
    pub limit: Option<usize>,
    /// Minimum query length in characters.
    pub min_query_length: Option<usize>,
    /// Interactive search debounce window in milliseconds.
    pub debounce_ms: Option<u64>,
}

/// Raw site settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSiteSettings {
    /// Prefix for artifact fetches.
    pub base_path: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}
