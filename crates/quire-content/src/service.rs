//! The content service: a content store behind a one-shot load.

use std::time::Duration;

use quire_config::SearchSettings;
use quire_document::{Document, OutlineEntry};
use tracing::{error, warn};

use crate::{
    ArtifactSource, ContentStore, Debouncer, MinLengthGate, NavCategory, QueryGate, ResultGroup, Route,
    group_by_category,
};

/// Where the service is in its lifecycle.
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Nothing has been loaded yet.
    Loading,
    /// Content is available.
    Ready(ContentStore),
    /// Loading failed; the message describes why.
    Failed(String),
}

/// Serves lookups, navigation and search over loaded content.
///
/// The service loads once. Until it is ready, and after a failed load, every query returns an
/// empty or absent result rather than an error.
#[derive(Debug)]
pub struct ContentService {
    /// Current lifecycle state.
    state: LoadState,
    /// Policy deciding which queries reach the index.
    gate: Box<dyn QueryGate>,
    /// Per-field hit cap applied to the loaded store.
    search_limit: usize,
    /// Quiet period for interactive query input.
    debounce: Duration,
}

impl ContentService {
    /// Creates a service with default search settings.
    pub fn new() -> Self {
        Self::from_settings(&SearchSettings::default())
    }

    /// Creates a service using the configured search settings.
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self {
            state: LoadState::Loading,
            gate: Box::new(MinLengthGate::new(settings.min_query_length)),
            search_limit: settings.limit,
            debounce: Duration::from_millis(settings.debounce_ms),
        }
    }

    /// Replaces the query gate.
    pub fn with_gate(mut self, gate: impl QueryGate + 'static) -> Self {
        self.gate = Box::new(gate);
        self
    }

    /// Creates a service that is already ready with `store`.
    pub fn with_store(store: ContentStore) -> Self {
        Self {
            state: LoadState::Ready(store),
            ..Self::new()
        }
    }

    /// Returns a debouncer for interactive query input, using the configured window.
    pub fn debouncer(&self) -> Debouncer {
        Debouncer::new(self.debounce)
    }

    /// Loads content from `source`.
    ///
    /// Only the first call does anything; later calls are logged and ignored. Any fatal
    /// problem is captured in [`LoadState::Failed`].
    pub fn load(&mut self, source: &dyn ArtifactSource) -> &LoadState {
        if !self.is_loading() {
            warn!("content already loaded; ignoring load request");
            return &self.state;
        }

        self.state = match ContentStore::load(source) {
            Ok(store) => LoadState::Ready(store.with_search_limit(self.search_limit)),
            Err(e) => {
                error!(error = %e, "failed to load content");
                LoadState::Failed(format!("Failed to load content metadata: {e}"))
            }
        };
        &self.state
    }

    /// Returns the current state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Returns true until a load has completed.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Returns the load error, if loading failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Returns the loaded store, if ready.
    pub fn store(&self) -> Option<&ContentStore> {
        match &self.state {
            LoadState::Ready(store) => Some(store),
            _ => None,
        }
    }

    /// Returns every loaded document.
    pub fn documents(&self) -> &[Document] {
        self.store().map(ContentStore::documents).unwrap_or_default()
    }

    /// Looks up a page by version and slug.
    pub fn get(&self, version: &str, slug: &str) -> Option<&Document> {
        self.store()?.get(version, slug)
    }

    /// Builds the navigation tree for `version`.
    pub fn navigation(&self, version: &str) -> Vec<NavCategory> {
        self.store()
            .map(|s| s.navigation(version))
            .unwrap_or_default()
    }

    /// Returns the distinct versions, newest first.
    pub fn versions(&self) -> Vec<&str> {
        self.store().map(ContentStore::versions).unwrap_or_default()
    }

    /// Returns the newest version.
    pub fn latest_version(&self) -> Option<&str> {
        self.store()?.latest_version()
    }

    /// Returns the first page of `version`.
    pub fn first_page(&self, version: &str) -> Option<&Document> {
        self.store()?.first_page(version)
    }

    /// Resolves a requested version (or `latest`) and optional slug.
    pub fn resolve(&self, version: &str, slug: Option<&str>) -> Route<'_> {
        self.store()
            .map_or(Route::NotFound, |s| s.resolve(version, slug))
    }

    /// Returns the outline of a page.
    pub fn outline(&self, version: &str, slug: &str) -> Option<Vec<OutlineEntry>> {
        self.store()?.outline(version, slug)
    }

    /// Searches loaded content.
    ///
    /// Queries the gate rejects return nothing without touching the index.
    pub fn search(&self, query: &str) -> Vec<&Document> {
        if !self.gate.admits(query) {
            return Vec::new();
        }
        self.store().map(|s| s.search(query)).unwrap_or_default()
    }

    /// Searches loaded content and groups the results by category.
    pub fn search_grouped(&self, query: &str) -> Vec<ResultGroup<'_>> {
        group_by_category(&self.search(query))
    }
}

impl Default for ContentService {
    fn default() -> Self {
        Self::new()
    }
}
