//! Implementation of `quire versions`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;

use crate::cli::{
    args::JsonArgs,
    context::CommandContext,
    output::{dim, print_json},
};

/// One row of the version listing.
#[derive(Serialize)]
struct VersionRow<'a> {
    /// Version name.
    version: &'a str,
    /// Number of pages in the version.
    pages: usize,
    /// Whether this is the newest version.
    latest: bool,
}

/// Lists versions, newest first, with their page counts.
pub fn run(ctx: &mut CommandContext, cmd: &JsonArgs) -> ExitCode {
    let service = match ctx.service() {
        Ok(s) => s,
        Err(code) => return code,
    };

    let documents = service.documents();
    let rows: Vec<VersionRow<'_>> = service
        .versions()
        .into_iter()
        .enumerate()
        .map(|(idx, version)| VersionRow {
            version,
            pages: documents.iter().filter(|d| d.version == version).count(),
            latest: idx == 0,
        })
        .collect();

    if cmd.json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("{}", dim("No versions found."));
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Version", "Pages", ""]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(row.version),
            Cell::new(row.pages.to_string()),
            Cell::new(if row.latest { "latest" } else { "" }),
        ]);
    }
    println!("{table}");

    ExitCode::SUCCESS
}
