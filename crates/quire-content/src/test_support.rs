//! Test utilities for quire-content.

use std::collections::HashMap;

use serde_json::Value;

use crate::{ArtifactSource, ContentError};

/// An in-memory artifact source.
#[derive(Debug, Default)]
pub struct MemorySource {
    /// Artifact contents by name.
    artifacts: HashMap<String, String>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an artifact from a JSON value.
    pub fn with(self, name: &str, value: Value) -> Self {
        let raw = value.to_string();
        self.with_raw(name, &raw)
    }

    /// Adds an artifact from raw text.
    pub fn with_raw(mut self, name: &str, raw: &str) -> Self {
        self.artifacts.insert(name.to_string(), raw.to_string());
        self
    }
}

impl ArtifactSource for MemorySource {
    fn fetch(&self, name: &str) -> Result<Option<String>, ContentError> {
        Ok(self.artifacts.get(name).cloned())
    }

    fn location(&self, name: &str) -> String {
        format!("memory:{name}")
    }
}
