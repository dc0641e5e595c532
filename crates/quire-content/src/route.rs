//! Route resolution results.

use quire_document::Document;

/// Version name that always refers to the newest version.
pub const LATEST_ALIAS: &str = "latest";

/// Where a requested `(version, slug)` leads.
#[derive(Debug, Clone, PartialEq)]
pub enum Route<'a> {
    /// The requested page exists.
    Page(&'a Document),
    /// The request should be redirected to a concrete page.
    Redirect {
        /// Target version.
        version: String,
        /// Target slug.
        slug: String,
    },
    /// Nothing matches the request.
    NotFound,
}

impl Route<'_> {
    /// Builds a redirect to `doc`, or `NotFound` when there is no target.
    pub fn redirect_to(doc: Option<&Document>) -> Self {
        match doc {
            Some(doc) => Self::Redirect {
                version: doc.version.clone(),
                slug: doc.slug.clone(),
            },
            None => Self::NotFound,
        }
    }

    /// Returns true if the request resolved to nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
