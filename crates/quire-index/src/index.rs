//! The in-memory search index.
//!
//! Every word of every searchable field is indexed under each of its prefixes ("forward"
//! tokenization), so a partially typed word matches the full one. Postings remember whether
//! the prefix was a whole word and where it first occurred, which is all ranking needs.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use quire_document::DocumentId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Analyzer, Field, IndexError, SegmentMap, forward_prefixes};

/// Name of the segment listing every registered document id.
pub const REGISTRY_SEGMENT: &str = "reg";

/// Name of the segment holding the stored fields.
pub const STORE_SEGMENT: &str = "store";

/// Score for a query word that matched a whole indexed word.
const EXACT_SCORE: u32 = 2;

/// Score for a query word that matched only a prefix of an indexed word.
const PREFIX_SCORE: u32 = 1;

/// A document as fed into the index.
#[derive(Debug, Clone, Default)]
pub struct IndexedDocument {
    /// Document identifier.
    pub id: DocumentId,
    /// Title text; searchable and stored.
    pub title: String,
    /// Description text; searchable and stored.
    pub description: Option<String>,
    /// Version; stored only.
    pub version: String,
    /// Slug; stored only.
    pub slug: String,
    /// Body text; searchable but not stored.
    pub content: String,
}

impl IndexedDocument {
    /// Returns the text of a searchable field.
    fn field_text(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => self.description.as_deref().unwrap_or_default(),
            Field::Content => &self.content,
        }
    }
}

/// Fields kept in the index so hits can be shown without the document collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFields {
    /// Document identifier.
    pub id: DocumentId,
    /// Document title.
    pub title: String,
    /// Document description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Document version.
    pub version: String,
    /// Document slug.
    pub slug: String,
}

/// One document's entry under a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Posting {
    /// Document that contains the prefix.
    id: DocumentId,
    /// Word position of the best occurrence.
    pos: u32,
    /// Whether some occurrence is a whole word.
    exact: bool,
}

impl Posting {
    /// Returns true if `self` ranks ahead of `other` for the same document.
    fn beats(&self, other: &Self) -> bool {
        (self.exact, other.pos) > (other.exact, self.pos)
    }
}

/// Prefix postings for one field.
type FieldPostings = BTreeMap<String, Vec<Posting>>;

/// Hits for one field, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHits {
    /// The field that matched.
    pub field: Field,
    /// Matching documents in rank order.
    pub ids: Vec<DocumentId>,
}

/// A forward-tokenized, multi-field search index.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    /// Text analyzer shared by indexing and querying.
    analyzer: Analyzer,
    /// Every document added to the index.
    registry: BTreeSet<DocumentId>,
    /// Per-field prefix postings.
    fields: BTreeMap<Field, FieldPostings>,
    /// Stored fields by document id.
    store: BTreeMap<DocumentId, StoredFields>,
}

impl SearchIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of indexed documents.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if no documents are indexed.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Returns true if `id` is indexed.
    pub fn contains(&self, id: DocumentId) -> bool {
        self.registry.contains(&id)
    }

    /// Returns the stored fields of a document.
    pub fn stored(&self, id: DocumentId) -> Option<&StoredFields> {
        self.store.get(&id)
    }

    /// Adds a document, replacing any document previously added under the same id.
    pub fn add(&mut self, doc: &IndexedDocument) {
        if self.contains(doc.id) {
            self.remove(doc.id);
        }

        for field in Field::ALL {
            let postings = self.document_postings(doc.field_text(field), doc.id);
            let target = self.fields.entry(field).or_default();
            for (prefix, posting) in postings {
                target.entry(prefix).or_default().push(posting);
            }
        }

        self.registry.insert(doc.id);
        self.store.insert(
            doc.id,
            StoredFields {
                id: doc.id,
                title: doc.title.clone(),
                description: doc.description.clone(),
                version: doc.version.clone(),
                slug: doc.slug.clone(),
            },
        );
    }

    /// Removes a document from the index.
    pub fn remove(&mut self, id: DocumentId) {
        self.registry.remove(&id);
        self.store.remove(&id);
        for postings in self.fields.values_mut() {
            postings.retain(|_, list| {
                list.retain(|p| p.id != id);
                !list.is_empty()
            });
        }
    }

    /// Computes the best posting per prefix for one field of one document.
    fn document_postings(&self, text: &str, id: DocumentId) -> BTreeMap<String, Posting> {
        let mut best: BTreeMap<String, Posting> = BTreeMap::new();
        for term in self.analyzer.terms(text) {
            for prefix in forward_prefixes(&term.text) {
                let candidate = Posting {
                    id,
                    pos: term.position,
                    exact: prefix.len() == term.text.len(),
                };
                match best.get_mut(prefix) {
                    Some(current) if candidate.beats(current) => *current = candidate,
                    Some(_) => {}
                    None => {
                        best.insert(prefix.to_string(), candidate);
                    }
                }
            }
        }
        best
    }

    /// Searches every field for `query`.
    ///
    /// Each query word must match (as a whole word or a prefix) within a single field for
    /// the document to hit on that field. Within a field, documents rank by summed match
    /// score (whole-word matches beat prefix matches), then by earliest matching position,
    /// then by id. At most `limit` hits are returned per field; fields with no hits are
    /// omitted.
    pub fn search(&self, query: &str, limit: usize) -> Vec<FieldHits> {
        let words = self.analyzer.words(query);
        if words.is_empty() || limit == 0 {
            return Vec::new();
        }

        Field::ALL
            .into_iter()
            .filter_map(|field| {
                let ids = self.search_field(field, &words, limit);
                debug!(%field, hits = ids.len(), "field searched");
                (!ids.is_empty()).then_some(FieldHits { field, ids })
            })
            .collect()
    }

    /// Searches one field for documents matching every word.
    fn search_field(&self, field: Field, words: &[String], limit: usize) -> Vec<DocumentId> {
        let Some(postings) = self.fields.get(&field) else {
            return Vec::new();
        };

        // (score, earliest position) per candidate document
        let mut candidates: Option<HashMap<DocumentId, (u32, u32)>> = None;
        for word in words {
            let Some(list) = postings.get(word) else {
                return Vec::new();
            };
            let matched: HashMap<DocumentId, (u32, u32)> = list
                .iter()
                .map(|p| {
                    let score = if p.exact { EXACT_SCORE } else { PREFIX_SCORE };
                    (p.id, (score, p.pos))
                })
                .collect();

            candidates = Some(match candidates {
                None => matched,
                Some(previous) => previous
                    .into_iter()
                    .filter_map(|(id, (score, pos))| {
                        matched
                            .get(&id)
                            .map(|&(s, p)| (id, (score + s, pos.min(p))))
                    })
                    .collect(),
            });
        }

        let mut ranked: Vec<(DocumentId, (u32, u32))> =
            candidates.unwrap_or_default().into_iter().collect();
        ranked.sort_by(|(a_id, (a_score, a_pos)), (b_id, (b_score, b_pos))| {
            b_score
                .cmp(a_score)
                .then(a_pos.cmp(b_pos))
                .then(a_id.cmp(b_id))
        });
        ranked.truncate(limit);
        ranked.into_iter().map(|(id, _)| id).collect()
    }

    /// Exports the index as an ordered segment map.
    ///
    /// Segments are written in the order `reg`, one `<field>.map` per field, then `store`.
    /// An empty index exports no segments at all.
    pub fn export(&self) -> Result<SegmentMap, IndexError> {
        let mut segments = SegmentMap::new();
        if self.is_empty() {
            return Ok(segments);
        }

        segments.insert(
            REGISTRY_SEGMENT,
            encode(REGISTRY_SEGMENT, &self.registry)?,
        );
        let no_postings = FieldPostings::new();
        for field in Field::ALL {
            let name = field.segment_name();
            let postings = self.fields.get(&field).unwrap_or(&no_postings);
            let payload = encode(&name, postings)?;
            segments.insert(name, payload);
        }
        let stored: Vec<&StoredFields> = self.store.values().collect();
        segments.insert(STORE_SEGMENT, encode(STORE_SEGMENT, &stored)?);

        Ok(segments)
    }

    /// Rebuilds an index by replaying exported segments in order.
    pub fn import(segments: &SegmentMap) -> Result<Self, IndexError> {
        let mut index = Self::new();
        for (name, payload) in segments.iter() {
            index.import_segment(name, payload)?;
        }
        debug!(documents = index.len(), segments = segments.len(), "index imported");
        Ok(index)
    }

    /// Replays a single exported segment into this index.
    pub fn import_segment(&mut self, name: &str, payload: &str) -> Result<(), IndexError> {
        if name == REGISTRY_SEGMENT {
            self.registry = decode(name, payload)?;
        } else if name == STORE_SEGMENT {
            let stored: Vec<StoredFields> = decode(name, payload)?;
            self.store = stored.into_iter().map(|s| (s.id, s)).collect();
        } else if let Some(field) = Field::from_segment_name(name) {
            let postings: FieldPostings = decode(name, payload)?;
            self.fields.insert(field, postings);
        } else {
            return Err(IndexError::UnknownSegment(name.to_string()));
        }
        Ok(())
    }
}

/// Serializes a segment payload.
fn encode<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<String, IndexError> {
    serde_json::to_string(value).map_err(|e| IndexError::serialize(name, e))
}

/// Deserializes a segment payload.
fn decode<T: for<'de> Deserialize<'de>>(name: &str, payload: &str) -> Result<T, IndexError> {
    serde_json::from_str(payload).map_err(|e| IndexError::corrupt_segment(name, e))
}
