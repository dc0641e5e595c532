//! Search index and index builder for quire.
//!
//! This crate turns a versioned content tree into the artifacts the content service loads.
//! It handles:
//! - Source file discovery in a reproducible order
//! - Text analysis built on Tantivy's tokenizer pipeline
//! - A forward-tokenized, multi-field search index with ranked prefix queries
//! - Exporting the index as an ordered segment map and replaying it back
//! - Writing the metadata, full-content and search-index artifacts
//!
//! # Example
//!
//! ```
//! use quire_document::DocumentId;
//! use quire_index::{IndexedDocument, SearchIndex};
//!
//! let mut index = SearchIndex::new();
//! index.add(&IndexedDocument {
//!     id: DocumentId(0),
//!     title: "Surround Sound".to_string(),
//!     content: "positional audio".to_string(),
//!     ..Default::default()
//! });
//!
//! let hits = index.search("surr", 10);
//! assert_eq!(hits[0].ids, vec![DocumentId(0)]);
//! ```

#![warn(missing_docs)]

mod analyzer;
mod artifacts;
mod builder;
mod discovery;
mod error;
mod field;
mod index;
mod segments;

pub use analyzer::{Analyzer, Term, build_analyzer, forward_prefixes};
pub use artifacts::{
    ARTIFACT_NAMES, ArtifactStatus, FULL_CONTENT_ARTIFACT, METADATA_ARTIFACT,
    SEARCH_INDEX_ARTIFACT, artifact_status, render_artifacts, write_artifacts,
};
pub use builder::{
    BuildOutput, BuildStats, IndexBuilder, ProgressReporter, SilentReporter, build_corpus,
};
pub use discovery::{DiscoveredFile, Discovery, UnreadableEntry, discover_files};
pub use error::IndexError;
pub use field::Field;
pub use index::{
    FieldHits, IndexedDocument, REGISTRY_SEGMENT, STORE_SEGMENT, SearchIndex, StoredFields,
};
pub use segments::SegmentMap;
