//! Text analysis pipeline for the quire search index.
//!
//! Implements a four-stage text analysis pipeline:
//! 1. `SimpleTokenizer` - splits on whitespace and punctuation
//! 2. `LowerCaser` - converts tokens to lowercase
//! 3. `AsciiFoldingFilter` - folds accented characters to their ASCII equivalents
//! 4. `RemoveLongFilter` - removes tokens longer than 40 bytes
//!
//! There is no stemmer: the index matches on word prefixes instead, so a partially typed
//! word finds the full one.

use std::fmt;

use tantivy::tokenizer::{
    AsciiFoldingFilter, LowerCaser, RemoveLongFilter, SimpleTokenizer, TextAnalyzer, TokenStream,
};

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// A token produced by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Normalized token text.
    pub text: String,
    /// Word position within the analyzed text.
    pub position: u32,
}

/// Builds the quire text analyzer.
pub fn build_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(AsciiFoldingFilter)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .build()
}

/// Shared text analyzer used for both indexing and querying.
#[derive(Clone)]
pub struct Analyzer {
    /// The underlying Tantivy analyzer.
    inner: TextAnalyzer,
}

impl Analyzer {
    /// Creates an analyzer with the standard quire pipeline.
    pub fn new() -> Self {
        Self {
            inner: build_analyzer(),
        }
    }

    /// Splits `text` into normalized terms with their word positions.
    pub fn terms(&self, text: &str) -> Vec<Term> {
        let mut analyzer = self.inner.clone();
        let mut stream = analyzer.token_stream(text);
        let mut terms = Vec::new();
        stream.process(&mut |token| {
            terms.push(Term {
                text: token.text.clone(),
                position: u32::try_from(token.position).unwrap_or(u32::MAX),
            });
        });
        terms
    }

    /// Returns the distinct normalized words of `text`, in first-seen order.
    pub fn words(&self, text: &str) -> Vec<String> {
        let mut words: Vec<String> = Vec::new();
        for term in self.terms(text) {
            if !words.contains(&term.text) {
                words.push(term.text);
            }
        }
        words
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer").finish_non_exhaustive()
    }
}

/// Returns every non-empty prefix of `token`, shortest first.
///
/// Prefixes end on character boundaries, so multi-byte characters are never split.
pub fn forward_prefixes(token: &str) -> impl Iterator<Item = &str> {
    token
        .char_indices()
        .map(|(idx, c)| idx + c.len_utf8())
        .map(move |end| &token[..end])
}
