//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use quire_content::{NavCategory, ResultGroup};
use quire_document::{Document, OutlineEntry};
pub use quire_highlight::{Highlighter, dim, header, indent_content, rule, subheader, warning};
use serde::Serialize;

/// A page reference in JSON output.
#[derive(Serialize)]
pub struct JsonPage<'a> {
    /// Corpus-wide id.
    id: u32,
    /// Version the page belongs to.
    version: &'a str,
    /// Page slug.
    slug: &'a str,
    /// Page title.
    title: &'a str,
    /// Page description, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl<'a> From<&'a Document> for JsonPage<'a> {
    fn from(doc: &'a Document) -> Self {
        Self {
            id: doc.id.0,
            version: &doc.version,
            slug: &doc.slug,
            title: &doc.title,
            description: doc.description.as_deref(),
        }
    }
}

/// One category of search results in JSON output.
#[derive(Serialize)]
struct JsonGroup<'a> {
    /// Category name.
    category: &'a str,
    /// Pages in rank order.
    results: Vec<JsonPage<'a>>,
}

/// JSON output for `quire search`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The query as searched.
    query: &'a str,
    /// Total number of pages found.
    total_matches: usize,
    /// Results grouped by category.
    groups: Vec<JsonGroup<'a>>,
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints grouped search results, as text or JSON.
pub fn output_search_results(query: &str, groups: &[ResultGroup<'_>], json: bool) -> ExitCode {
    if json {
        let output = JsonSearchOutput {
            query,
            total_matches: groups.iter().map(|g| g.documents.len()).sum(),
            groups: groups
                .iter()
                .map(|g| JsonGroup {
                    category: g.category,
                    results: g.documents.iter().map(|&d| JsonPage::from(d)).collect(),
                })
                .collect(),
        };
        return print_json(&output);
    }

    if groups.is_empty() {
        println!("{}", dim("No results found."));
        return ExitCode::SUCCESS;
    }

    for group in groups {
        println!("{}", header(group.category));
        for doc in &group.documents {
            println!("   {} {}", doc.title, dim(&page_ref(doc)));
            if let Some(description) = &doc.description {
                println!("      {}", dim(description));
            }
        }
        println!();
    }
    ExitCode::SUCCESS
}

/// Prints a navigation tree, as text or JSON.
pub fn output_navigation(version: &str, nav: &[NavCategory], json: bool) -> ExitCode {
    if json {
        return print_json(nav);
    }

    if nav.is_empty() {
        println!("{}", dim(&format!("No pages in version {version}.")));
        return ExitCode::SUCCESS;
    }

    for category in nav {
        println!("{}", header(&category.title));
        for leaf in &category.children {
            println!("   {} {}", leaf.title, dim(&leaf.slug));
        }
        println!();
    }
    ExitCode::SUCCESS
}

/// Prints a page summary: title, location and description.
pub fn print_page_summary(doc: &Document) {
    println!("{}", header(&doc.title));
    println!("{}", dim(&page_ref(doc)));
    if let Some(description) = &doc.description {
        println!();
        println!("{description}");
    }
}

/// Prints an outline with nesting by heading level.
pub fn print_outline(outline: &[OutlineEntry]) {
    if outline.is_empty() {
        println!("{}", dim("(no headings)"));
        return;
    }
    for entry in outline {
        let depth = usize::from(entry.level.saturating_sub(2));
        println!(
            "{}{} {}",
            "  ".repeat(depth),
            entry.title,
            dim(&format!("#{}", entry.id))
        );
    }
}

/// Formats a page's location as `version/slug`.
fn page_ref(doc: &Document) -> String {
    format!("{}/{}", doc.version, doc.slug)
}
