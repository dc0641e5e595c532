//! The index builder.
//!
//! The [`IndexBuilder`] runs the complete build:
//! 1. Discover source files under the content root, sorted by relative path
//! 2. Assign sequential ids from 0 in that order
//! 3. Parse each file into a metadata record and a full-content record
//! 4. Feed title, description and body into the search index
//! 5. Write the three artifacts to the output directory

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use quire_config::{Config, ErrorPolicy};
use quire_document::{Document, DocumentId, ParsedDocument, read_document};
use tracing::{debug, info, warn};

use crate::{
    Discovery, IndexError, IndexedDocument, SearchIndex, discover_files, write_artifacts,
};

/// Statistics from a build.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of source files discovered.
    pub files_found: usize,
    /// Number of documents emitted.
    pub documents: usize,
    /// Files left out under the skip policy (file path, error message).
    pub skipped: Vec<(PathBuf, String)>,
    /// Number of documents whose `(version, slug)` pair was already taken.
    pub duplicates: usize,
}

impl BuildStats {
    /// Returns the number of skipped files.
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }

    /// Returns true if every discovered file became a document.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Everything a build produces, before it is written out.
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    /// Metadata records, in id order.
    pub metadata: Vec<Document>,
    /// Full-content records, in id order.
    pub full: Vec<Document>,
    /// The populated search index.
    pub index: SearchIndex,
    /// Build statistics.
    pub stats: BuildStats,
}

/// Callback for reporting build progress.
pub trait ProgressReporter {
    /// Called when starting to process a file.
    fn on_file_start(&mut self, path: &Path, current: usize, total: usize);

    /// Called when a file became a document.
    fn on_file_done(&mut self, path: &Path, id: DocumentId);

    /// Called when a file could not be parsed.
    fn on_file_error(&mut self, path: &Path, error: &str);

    /// Called when the build is complete.
    fn on_complete(&mut self, stats: &BuildStats);
}

/// A no-op progress reporter for silent builds.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_file_start(&mut self, _path: &Path, _current: usize, _total: usize) {}
    fn on_file_done(&mut self, _path: &Path, _id: DocumentId) {}
    fn on_file_error(&mut self, _path: &Path, _error: &str) {}
    fn on_complete(&mut self, _stats: &BuildStats) {}
}

/// Orchestrates a full build from configuration.
pub struct IndexBuilder<'a> {
    /// The loaded configuration.
    config: &'a Config,
}

impl<'a> IndexBuilder<'a> {
    /// Creates a builder for the given configuration.
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Discovers and parses every source file, returning the records and index in memory.
    pub fn build<R: ProgressReporter>(&self, reporter: &mut R) -> Result<BuildOutput, IndexError> {
        let root = &self.config.content.dir;
        let discovery = discover_files(root, &self.config.content.extensions)?;
        debug!(
            root = %root.display(),
            files = discovery.files.len(),
            unreadable = discovery.unreadable.len(),
            "discovered source files"
        );
        build_corpus(root, discovery, self.config.build.on_error, reporter)
    }

    /// Runs a build and writes the artifacts to the configured output directory.
    ///
    /// Nothing is written unless the whole build succeeds.
    pub fn build_and_write<R: ProgressReporter>(
        &self,
        reporter: &mut R,
    ) -> Result<BuildStats, IndexError> {
        let output = self.build(reporter)?;
        write_artifacts(&self.config.output.dir, &output)?;
        info!(
            documents = output.stats.documents,
            dir = %self.config.output.dir.display(),
            "artifacts written"
        );
        Ok(output.stats)
    }

    /// Returns the directory artifacts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.config.output.dir
    }
}

/// Builds records and the search index from the result of a content walk.
///
/// Ids are assigned in the order of the discovered files. Under [`ErrorPolicy::Fail`] the
/// first unreadable entry or parse failure is returned; under [`ErrorPolicy::Skip`] the
/// entry is reported and skipped without consuming an id.
pub fn build_corpus<R: ProgressReporter>(
    root: &Path,
    discovery: Discovery,
    policy: ErrorPolicy,
    reporter: &mut R,
) -> Result<BuildOutput, IndexError> {
    let Discovery { files, unreadable } = discovery;
    let mut output = BuildOutput {
        stats: BuildStats {
            files_found: files.len(),
            ..Default::default()
        },
        ..Default::default()
    };

    for entry in unreadable {
        let message = entry.error.to_string();
        reporter.on_file_error(&entry.rel_path, &message);
        match policy {
            ErrorPolicy::Fail => return Err(entry.into_error()),
            ErrorPolicy::Skip => {
                warn!(path = %entry.rel_path.display(), error = %message, "skipping unreadable entry");
                output.stats.skipped.push((entry.rel_path, message));
            }
        }
    }

    let mut seen: HashMap<(String, String), PathBuf> = HashMap::new();
    let total = files.len();

    for (idx, file) in files.iter().enumerate() {
        reporter.on_file_start(&file.rel_path, idx + 1, total);

        let id = DocumentId(u32::try_from(output.metadata.len()).unwrap_or(u32::MAX));
        let parsed = match read_document(root, &file.rel_path, id) {
            Ok(parsed) => parsed,
            Err(e) => {
                let message = e.to_string();
                reporter.on_file_error(&file.rel_path, &message);
                match policy {
                    ErrorPolicy::Fail => return Err(e.into()),
                    ErrorPolicy::Skip => {
                        warn!(path = %file.rel_path.display(), error = %message, "skipping document");
                        output.stats.skipped.push((file.rel_path.clone(), message));
                        continue;
                    }
                }
            }
        };

        let full = parsed.full_record();
        let ParsedDocument { document: doc, body, .. } = parsed;
        let key = (doc.version.clone(), doc.slug.clone());
        if let Some(first) = seen.get(&key) {
            warn!(
                version = %doc.version,
                slug = %doc.slug,
                first = %first.display(),
                duplicate = %file.rel_path.display(),
                "duplicate version/slug pair; lookups will return the first"
            );
            output.stats.duplicates += 1;
        } else {
            seen.insert(key, file.rel_path.clone());
        }

        output.index.add(&IndexedDocument {
            id,
            title: doc.title.clone(),
            description: doc.description.clone(),
            version: doc.version.clone(),
            slug: doc.slug.clone(),
            content: body,
        });
        output.full.push(full);
        output.metadata.push(doc);
        reporter.on_file_done(&file.rel_path, id);
    }

    output.stats.documents = output.metadata.len();
    reporter.on_complete(&output.stats);
    Ok(output)
}
