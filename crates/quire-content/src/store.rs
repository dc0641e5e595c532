//! The loaded content collection and its query operations.
//!
//! A [`ContentStore`] owns every document and, when available, the search index. It is built
//! once by [`ContentStore::load`] and never mutated afterwards.

use std::collections::{HashMap, HashSet};

use quire_document::{Document, DocumentId, OutlineEntry};
use quire_index::{
    FULL_CONTENT_ARTIFACT, METADATA_ARTIFACT, SEARCH_INDEX_ARTIFACT, SearchIndex, SegmentMap,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    ArtifactSource, ContentError, LATEST_ALIAS, NavCategory, Route, build_navigation,
    first_page, sort_versions_desc,
};

/// Default number of hits collected per searchable field.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// The part of a full-content record the join needs.
#[derive(Debug, Deserialize)]
struct FullRecord {
    /// Join key.
    id: DocumentId,
    /// Raw source text.
    #[serde(default)]
    content: Option<String>,
}

/// Every loaded document plus the search index.
#[derive(Debug, Clone)]
pub struct ContentStore {
    /// Documents in id order as written by the builder.
    documents: Vec<Document>,
    /// Position of each id in `documents`; the first occurrence wins.
    by_id: HashMap<DocumentId, usize>,
    /// The search index, if it loaded.
    index: Option<SearchIndex>,
    /// Per-field hit cap for searches.
    search_limit: usize,
}

impl ContentStore {
    /// Creates a store from documents and an optional index.
    pub fn new(documents: Vec<Document>, index: Option<SearchIndex>) -> Self {
        let mut by_id = HashMap::with_capacity(documents.len());
        for (pos, doc) in documents.iter().enumerate() {
            by_id.entry(doc.id).or_insert(pos);
        }
        Self {
            documents,
            by_id,
            index,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Sets the per-field hit cap used by [`ContentStore::search`].
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Loads the three artifacts from `source`.
    ///
    /// The metadata artifact is required; its absence or corruption is the only error. A
    /// missing or unreadable full-content artifact leaves documents without content, and a
    /// missing or corrupt search index leaves the store without search. Both are logged.
    pub fn load(source: &dyn ArtifactSource) -> Result<Self, ContentError> {
        let mut documents = load_metadata(source)?;
        let mut contents = load_contents(source);
        let index = load_index(source);

        let mut joined = 0;
        for doc in &mut documents {
            doc.content = contents.remove(&doc.id);
            if doc.content.is_some() {
                joined += 1;
            }
        }

        info!(
            documents = documents.len(),
            with_content = joined,
            search = index.is_some(),
            "content loaded"
        );
        Ok(Self::new(documents, index))
    }

    /// Returns every document.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if there are no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns true if a search index is available.
    pub fn has_search(&self) -> bool {
        self.index.is_some()
    }

    /// Looks up a document by version and slug; the first match wins.
    pub fn get(&self, version: &str, slug: &str) -> Option<&Document> {
        self.documents
            .iter()
            .find(|d| d.version == version && d.slug == slug)
    }

    /// Looks up a document by id.
    pub fn get_by_id(&self, id: DocumentId) -> Option<&Document> {
        self.by_id.get(&id).map(|&pos| &self.documents[pos])
    }

    /// Builds the navigation tree for `version`.
    pub fn navigation(&self, version: &str) -> Vec<NavCategory> {
        build_navigation(&self.documents, version)
    }

    /// Returns the distinct versions, newest first.
    pub fn versions(&self) -> Vec<&str> {
        sort_versions_desc(self.documents.iter().map(|d| d.version.as_str()))
    }

    /// Returns the newest version.
    pub fn latest_version(&self) -> Option<&str> {
        self.versions().into_iter().next()
    }

    /// Returns the first page of `version` in navigation order.
    pub fn first_page(&self, version: &str) -> Option<&Document> {
        first_page(&self.documents, version)
    }

    /// Resolves a requested version (or `latest`) and optional slug.
    ///
    /// - `latest` without a slug redirects to the first page of the newest version
    /// - `latest` with a slug redirects to the newest version containing that slug
    /// - a version without a slug, or with a slug it doesn't contain, redirects to the
    ///   version's first page
    /// - otherwise the page itself is returned
    pub fn resolve(&self, version: &str, slug: Option<&str>) -> Route<'_> {
        if version == LATEST_ALIAS {
            return match slug {
                None => Route::redirect_to(
                    self.latest_version().and_then(|v| self.first_page(v)),
                ),
                Some(slug) => Route::redirect_to(
                    self.versions()
                        .into_iter()
                        .find_map(|v| self.get(v, slug)),
                ),
            };
        }

        match slug.and_then(|s| self.get(version, s)) {
            Some(doc) => Route::Page(doc),
            None => Route::redirect_to(self.first_page(version)),
        }
    }

    /// Returns the outline of a page, or `None` if the page doesn't exist.
    ///
    /// The outline is empty when the page's content wasn't loaded.
    pub fn outline(&self, version: &str, slug: &str) -> Option<Vec<OutlineEntry>> {
        self.get(version, slug).map(Document::outline)
    }

    /// Searches the index and resolves hits to documents.
    ///
    /// The query is trimmed; an empty query, or a store without an index, returns nothing.
    /// Field hits are merged in field order (title, description, content) and deduplicated
    /// by id, keeping the first occurrence. Ids with no matching document are dropped.
    pub fn search(&self, query: &str) -> Vec<&Document> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let Some(index) = &self.index else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let results: Vec<&Document> = index
            .search(query, self.search_limit)
            .into_iter()
            .flat_map(|hits| hits.ids)
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.get_by_id(id))
            .collect();
        debug!(query, results = results.len(), "search");
        results
    }
}

/// Fetches and parses the metadata artifact.
fn load_metadata(source: &dyn ArtifactSource) -> Result<Vec<Document>, ContentError> {
    let raw = source
        .fetch(METADATA_ARTIFACT)?
        .ok_or_else(|| ContentError::Missing {
            name: METADATA_ARTIFACT.to_string(),
            location: source.location(METADATA_ARTIFACT),
        })?;
    let mut documents: Vec<Document> =
        serde_json::from_str(&raw).map_err(|source| ContentError::Parse {
            name: METADATA_ARTIFACT.to_string(),
            source,
        })?;
    // Metadata never carries content; the full-content artifact is authoritative.
    for doc in &mut documents {
        doc.content = None;
    }
    Ok(documents)
}

/// Fetches the full-content artifact as an id → content map.
///
/// Any failure is logged and yields an empty map.
fn load_contents(source: &dyn ArtifactSource) -> HashMap<DocumentId, String> {
    let raw = match source.fetch(FULL_CONTENT_ARTIFACT) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            warn!(
                location = %source.location(FULL_CONTENT_ARTIFACT),
                "full content not available, using metadata only"
            );
            return HashMap::new();
        }
        Err(e) => {
            warn!(error = %e, "could not load full content");
            return HashMap::new();
        }
    };

    match serde_json::from_str::<Vec<FullRecord>>(&raw) {
        Ok(records) => {
            let mut contents = HashMap::with_capacity(records.len());
            for record in records {
                if let Some(content) = record.content {
                    contents.entry(record.id).or_insert(content);
                }
            }
            contents
        }
        Err(e) => {
            warn!(error = %e, "could not parse full content");
            HashMap::new()
        }
    }
}

/// Fetches the search index artifact and replays its segments.
///
/// Any failure is logged and yields no index.
fn load_index(source: &dyn ArtifactSource) -> Option<SearchIndex> {
    let raw = match source.fetch(SEARCH_INDEX_ARTIFACT) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            warn!(
                location = %source.location(SEARCH_INDEX_ARTIFACT),
                "search index not available"
            );
            return None;
        }
        Err(e) => {
            warn!(error = %e, "could not load search index");
            return None;
        }
    };

    let segments: SegmentMap = match serde_json::from_str(&raw) {
        Ok(segments) => segments,
        Err(e) => {
            warn!(error = %e, "could not parse search index");
            return None;
        }
    };

    match SearchIndex::import(&segments) {
        Ok(index) => Some(index),
        Err(e) => {
            warn!(error = %e, "could not set up search index");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use quire_document::DocumentId;
    use quire_index::IndexedDocument;
    use serde_json::{Map, json};

    use super::*;
    use crate::test_support::MemorySource;

    fn doc(id: u32, version: &str, slug: &str, title: &str) -> Document {
        Document {
            id: DocumentId(id),
            slug: slug.to_string(),
            version: version.to_string(),
            title: title.to_string(),
            description: None,
            nav_order: None,
            category: None,
            extra: Map::new(),
            content: None,
        }
    }

    fn indexed(doc: &Document, body: &str) -> IndexedDocument {
        IndexedDocument {
            id: doc.id,
            title: doc.title.clone(),
            description: doc.description.clone(),
            version: doc.version.clone(),
            slug: doc.slug.clone(),
            content: body.to_string(),
        }
    }

    fn surround_store() -> ContentStore {
        let surround = doc(0, "v1.0", "surround", "Surround Sound");
        let mut index = SearchIndex::new();
        index.add(&indexed(&surround, "positional audio"));
        ContentStore::new(vec![surround], Some(index))
    }

    #[test]
    fn search_scenario() {
        let store = surround_store();
        let hits: Vec<&str> = store.search("surr").iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(hits, vec!["surround"]);
        assert!(store.search("xyz123").is_empty());
    }

    #[test]
    fn search_empty_query() {
        let store = surround_store();
        assert!(store.search("").is_empty());
        assert!(store.search("   ").is_empty());
    }

    #[test]
    fn multi_field_match_appears_once() {
        let mut d = doc(0, "v1", "audio", "Audio routing");
        d.description = Some("Audio buses and sends".into());
        let mut index = SearchIndex::new();
        index.add(&indexed(&d, "audio everywhere"));
        let store = ContentStore::new(vec![d], Some(index));

        assert_eq!(store.search("audio").len(), 1);
    }

    #[test]
    fn search_merges_fields_in_order() {
        let a = doc(0, "v1", "a", "Mixer");
        let mut b = doc(1, "v1", "b", "Other");
        b.description = Some("mixer guide".into());
        let c = doc(2, "v1", "c", "Third");
        let mut index = SearchIndex::new();
        index.add(&indexed(&a, ""));
        index.add(&indexed(&b, "mixer"));
        index.add(&indexed(&c, "using the mixer"));
        let store = ContentStore::new(vec![a, b, c], Some(index));

        let ids: Vec<u32> = store.search("mix").iter().map(|d| d.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn search_drops_ids_without_documents() {
        let kept = doc(0, "v1", "kept", "Audio");
        let gone = doc(1, "v1", "gone", "Audio");
        let mut index = SearchIndex::new();
        index.add(&indexed(&kept, ""));
        index.add(&indexed(&gone, ""));
        let store = ContentStore::new(vec![kept], Some(index));

        assert_eq!(store.search("audio").len(), 1);
    }

    #[test]
    fn search_without_index_is_empty() {
        let store = ContentStore::new(vec![doc(0, "v1", "a", "Surround")], None);
        assert!(!store.has_search());
        assert!(store.search("surround").is_empty());
    }

    #[test]
    fn lookup_first_match_wins() {
        let store = ContentStore::new(
            vec![
                doc(0, "v1", "intro", "First"),
                doc(1, "v1", "intro", "Second"),
                doc(2, "v2", "intro", "Other version"),
            ],
            None,
        );

        assert_eq!(store.get("v1", "intro").map(|d| d.id.0), Some(0));
        assert_eq!(store.get("v2", "intro").map(|d| d.id.0), Some(2));
        assert!(store.get("v3", "intro").is_none());
        assert!(store.get("v1", "missing").is_none());
    }

    #[test]
    fn versions_newest_first() {
        let store = ContentStore::new(
            vec![
                doc(0, "v1.2.0", "a", "A"),
                doc(1, "v1.10.0", "a", "A"),
                doc(2, "v1.2.0", "b", "B"),
            ],
            None,
        );

        assert_eq!(store.versions(), vec!["v1.10.0", "v1.2.0"]);
        assert_eq!(store.latest_version(), Some("v1.10.0"));
    }

    fn routing_store() -> ContentStore {
        let mut intro_old = doc(0, "v1.0", "intro", "Intro");
        intro_old.nav_order = Some(1.0);
        let legacy = doc(1, "v1.0", "legacy", "Legacy");
        let mut intro_new = doc(2, "v2.0", "intro", "Intro");
        intro_new.nav_order = Some(1.0);
        let setup = doc(3, "v2.0", "setup", "Setup");
        ContentStore::new(vec![intro_old, legacy, intro_new, setup], None)
    }

    fn redirect(version: &str, slug: &str) -> Route<'static> {
        Route::Redirect {
            version: version.to_string(),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn resolve_latest_aliases() {
        let store = routing_store();
        assert_eq!(store.resolve("latest", None), redirect("v2.0", "intro"));
        assert_eq!(store.resolve("latest", Some("setup")), redirect("v2.0", "setup"));
        assert_eq!(store.resolve("latest", Some("legacy")), redirect("v1.0", "legacy"));
        assert!(store.resolve("latest", Some("nowhere")).is_not_found());
    }

    #[test]
    fn resolve_concrete_versions() {
        let store = routing_store();
        assert!(matches!(
            store.resolve("v1.0", Some("legacy")),
            Route::Page(d) if d.id == DocumentId(1)
        ));
        assert_eq!(store.resolve("v1.0", None), redirect("v1.0", "intro"));
        assert_eq!(store.resolve("v2.0", Some("legacy")), redirect("v2.0", "intro"));
        assert!(store.resolve("v9.0", Some("intro")).is_not_found());
    }

    #[test]
    fn resolve_latest_on_empty_store() {
        let store = ContentStore::new(Vec::new(), None);
        assert!(store.resolve("latest", None).is_not_found());
    }

    #[test]
    fn load_joins_content_by_id() {
        let source = MemorySource::new()
            .with(
                METADATA_ARTIFACT,
                json!([
                    {"id": 0, "slug": "a", "version": "v1", "title": "A"},
                    {"id": 1, "slug": "b", "version": "v1", "title": "B"}
                ]),
            )
            .with(
                FULL_CONTENT_ARTIFACT,
                json!([
                    {"id": 1, "slug": "b", "version": "v1", "title": "B", "content": "## Bee\n"}
                ]),
            );

        let store = ContentStore::load(&source).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get("v1", "a").unwrap().content.is_none());
        assert_eq!(store.get("v1", "b").unwrap().content_or_empty(), "## Bee\n");
        assert_eq!(store.outline("v1", "b").unwrap()[0].id, "bee");
        assert!(store.outline("v1", "a").unwrap().is_empty());
        assert!(store.outline("v1", "zzz").is_none());
        assert!(!store.has_search());
    }

    #[test]
    fn load_without_metadata_fails() {
        let source = MemorySource::new().with(FULL_CONTENT_ARTIFACT, json!([]));
        let err = ContentStore::load(&source).unwrap_err();
        assert!(matches!(err, ContentError::Missing { .. }));
        assert!(err.to_string().contains(METADATA_ARTIFACT));
    }

    #[test]
    fn load_with_corrupt_metadata_fails() {
        let source = MemorySource::new().with_raw(METADATA_ARTIFACT, "[{\"id\": ");
        assert!(matches!(
            ContentStore::load(&source),
            Err(ContentError::Parse { .. })
        ));
    }

    #[test]
    fn corrupt_full_content_is_soft() {
        let source = MemorySource::new()
            .with(
                METADATA_ARTIFACT,
                json!([{"id": 0, "slug": "a", "version": "v1", "title": "A"}]),
            )
            .with_raw(FULL_CONTENT_ARTIFACT, "not json");

        let store = ContentStore::load(&source).unwrap();
        assert_eq!(store.get("v1", "a").unwrap().content_or_empty(), "");
    }

    #[test]
    fn corrupt_segment_disables_search_only() {
        let source = MemorySource::new()
            .with(
                METADATA_ARTIFACT,
                json!([{"id": 0, "slug": "a", "version": "v1", "title": "Surround"}]),
            )
            .with(
                SEARCH_INDEX_ARTIFACT,
                json!({"reg": "[0]", "title.map": "{broken"}),
            );

        let store = ContentStore::load(&source).unwrap();

        assert!(!store.has_search());
        assert!(store.search("surround").is_empty());
        assert!(store.get("v1", "a").is_some());
    }

    #[test]
    fn load_replays_exported_index() {
        let surround = doc(0, "v1.0", "surround", "Surround Sound");
        let mut index = SearchIndex::new();
        index.add(&indexed(&surround, "positional audio"));
        let segments = serde_json::to_string(&index.export().unwrap()).unwrap();

        let source = MemorySource::new()
            .with(METADATA_ARTIFACT, serde_json::to_value([&surround]).unwrap())
            .with_raw(SEARCH_INDEX_ARTIFACT, &segments);

        let store = ContentStore::load(&source).unwrap();
        assert!(store.has_search());
        assert_eq!(store.search("posi").len(), 1);
    }
}
