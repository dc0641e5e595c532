//! Grouping search results for display.

use quire_document::Document;
use serde::Serialize;

/// Search results sharing a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultGroup<'a> {
    /// Category name ("General" when a document has none).
    pub category: &'a str,
    /// Documents in result order.
    pub documents: Vec<&'a Document>,
}

/// Groups ranked results by category.
///
/// Categories appear in the order their first result does; documents keep their rank order
/// within a category.
pub fn group_by_category<'a>(results: &[&'a Document]) -> Vec<ResultGroup<'a>> {
    let mut groups: Vec<ResultGroup<'a>> = Vec::new();
    for &doc in results {
        let category = doc.category_or_default();
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.documents.push(doc),
            None => groups.push(ResultGroup {
                category,
                documents: vec![doc],
            }),
        }
    }
    groups
}
