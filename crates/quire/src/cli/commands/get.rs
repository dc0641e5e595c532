//! Implementation of `quire get`.

use std::process::ExitCode;

use quire_content::{ContentService, Route};
use quire_document::Document;

use crate::cli::{
    args::GetCommand,
    context::CommandContext,
    output::{Highlighter, dim, print_json, print_outline, print_page_summary, subheader},
};

/// Resolves a version (or `latest`) and optional slug, then prints the page.
pub fn run(ctx: &mut CommandContext, cmd: &GetCommand) -> ExitCode {
    let service = match ctx.service() {
        Ok(s) => s,
        Err(code) => return code,
    };

    let Some(doc) = resolve_page(service, &cmd.version, cmd.slug.as_deref()) else {
        let requested = match &cmd.slug {
            Some(slug) => format!("{}/{slug}", cmd.version),
            None => cmd.version.clone(),
        };
        eprintln!("error: not found: {requested}");
        return ExitCode::FAILURE;
    };

    let outline = service
        .outline(&doc.version, &doc.slug)
        .unwrap_or_default();

    if cmd.output.json {
        return if cmd.outline {
            print_json(&outline)
        } else {
            print_json(doc)
        };
    }

    if cmd.raw {
        let Some(content) = &doc.content else {
            eprintln!(
                "error: content not available for {}/{}",
                doc.version, doc.slug
            );
            return ExitCode::FAILURE;
        };
        print!("{}", Highlighter::new().highlight_page(content));
        println!();
        return ExitCode::SUCCESS;
    }

    if cmd.outline {
        print_outline(&outline);
        return ExitCode::SUCCESS;
    }

    print_page_summary(doc);
    println!();
    println!(
        "{}",
        dim(&format!("category: {}", doc.category_or_default()))
    );
    if let Some(order) = doc.nav_order {
        println!("{}", dim(&format!("navOrder: {order}")));
    }
    if !outline.is_empty() {
        println!();
        println!("{}", subheader("Outline:"));
        print_outline(&outline);
    }
    ExitCode::SUCCESS
}

/// Follows a route to the page it names, including one redirect hop.
///
/// Redirects are reported on stderr so stdout carries only the page.
fn resolve_page<'a>(
    service: &'a ContentService,
    version: &str,
    slug: Option<&str>,
) -> Option<&'a Document> {
    match service.resolve(version, slug) {
        Route::Page(doc) => Some(doc),
        Route::Redirect { version, slug } => {
            eprintln!("{}", dim(&format!("-> {version}/{slug}")));
            service.get(&version, &slug)
        }
        Route::NotFound => None,
    }
}
