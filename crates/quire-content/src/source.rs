//! Where artifacts are loaded from.
//!
//! The content service doesn't care whether artifacts sit next to it on disk or behind a web
//! server; it asks an [`ArtifactSource`] for each one by file name.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

pub use quire_config::is_url;
use reqwest::{StatusCode, blocking::Client};
use tracing::debug;

use crate::ContentError;

/// Timeout for a single artifact request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A place artifacts can be fetched from.
pub trait ArtifactSource {
    /// Fetches the artifact called `name`.
    ///
    /// Returns `Ok(None)` if the artifact doesn't exist, and an error if it exists but
    /// couldn't be retrieved.
    fn fetch(&self, name: &str) -> Result<Option<String>, ContentError>;

    /// Describes where `name` would be fetched from, for messages.
    fn location(&self, name: &str) -> String;
}

/// Reads artifacts from a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    /// Directory containing the artifacts.
    base: PathBuf,
}

impl DirSource {
    /// Creates a source reading from `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Returns the directory this source reads from.
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl ArtifactSource for DirSource {
    fn fetch(&self, name: &str) -> Result<Option<String>, ContentError> {
        let path = self.base.join(name);
        debug!(path = %path.display(), "reading artifact");
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ContentError::Read { path, source }),
        }
    }

    fn location(&self, name: &str) -> String {
        self.base.join(name).display().to_string()
    }
}

/// Fetches artifacts over HTTP with blocking GET requests.
#[derive(Debug, Clone)]
pub struct HttpSource {
    /// Base URL the artifact names are appended to.
    base_url: String,
    /// Shared HTTP client.
    client: Client,
}

impl HttpSource {
    /// Creates a source fetching from `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ContentError> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|source| ContentError::Http {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { base_url, client })
    }
}

impl ArtifactSource for HttpSource {
    fn fetch(&self, name: &str) -> Result<Option<String>, ContentError> {
        let url = join_url(&self.base_url, name);
        debug!(%url, "fetching artifact");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ContentError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ContentError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .map(Some)
            .map_err(|source| ContentError::Http { url, source })
    }

    fn location(&self, name: &str) -> String {
        join_url(&self.base_url, name)
    }
}

/// Picks the source for an artifact base: HTTP for URLs, a directory otherwise.
pub fn source_for(base: &str) -> Result<Box<dyn ArtifactSource>, ContentError> {
    if is_url(base) {
        Ok(Box::new(HttpSource::new(base)?))
    } else {
        Ok(Box::new(DirSource::new(base)))
    }
}

/// Joins a base URL and an artifact name with exactly one `/` between them.
pub fn join_url(base: &str, name: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        name.trim_start_matches('/')
    )
}
