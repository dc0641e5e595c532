//! Navigation tree construction.
//!
//! The navigation tree for a version is computed on demand from the document collection:
//! documents are bucketed by category, leaves are ordered by `navOrder`, and categories are
//! ordered by name.

use std::cmp::Ordering;

use quire_document::Document;
use serde::Serialize;

/// A page reference in the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLeaf {
    /// Page title.
    pub title: String,
    /// Page slug.
    pub slug: String,
}

/// A category and its pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavCategory {
    /// Category name.
    pub title: String,
    /// Pages in navigation order.
    pub children: Vec<NavLeaf>,
}

/// Orders navigation hints: explicit orders ascending, then documents without one.
pub fn nav_order_cmp(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Orders category names alphabetically, ignoring case first.
fn category_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Builds the navigation tree for `version`.
///
/// Returns an empty tree for a version with no documents. Ties in `navOrder` keep the
/// documents' collection order.
pub fn build_navigation(documents: &[Document], version: &str) -> Vec<NavCategory> {
    let mut buckets: Vec<(&str, Vec<&Document>)> = Vec::new();
    for doc in documents.iter().filter(|d| d.version == version) {
        let category = doc.category_or_default();
        match buckets.iter_mut().find(|(name, _)| *name == category) {
            Some((_, docs)) => docs.push(doc),
            None => buckets.push((category, vec![doc])),
        }
    }

    buckets.sort_by(|(a, _), (b, _)| category_cmp(a, b));
    buckets
        .into_iter()
        .map(|(name, mut docs)| {
            docs.sort_by(|a, b| nav_order_cmp(a.nav_order, b.nav_order));
            NavCategory {
                title: name.to_string(),
                children: docs
                    .into_iter()
                    .map(|d| NavLeaf {
                        title: d.title.clone(),
                        slug: d.slug.clone(),
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Returns the first page of `version`: its document with the lowest `navOrder`.
///
/// Ties keep collection order, and documents without an order only win when no document in
/// the version has one.
pub fn first_page<'a>(documents: &'a [Document], version: &str) -> Option<&'a Document> {
    documents
        .iter()
        .filter(|d| d.version == version)
        .fold(None, |best: Option<&Document>, doc| match best {
            Some(b) if nav_order_cmp(doc.nav_order, b.nav_order).is_lt() => Some(doc),
            Some(b) => Some(b),
            None => Some(doc),
        })
}
