//! Implementation of `quire search`.

use std::process::ExitCode;

use crate::cli::{args::SearchCommand, context::CommandContext, output::output_search_results};

/// Searches loaded content and prints results grouped by category.
pub fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let service = match ctx.service() {
        Ok(s) => s,
        Err(code) => return code,
    };

    let query = cmd.query_string();
    let groups = service.search_grouped(&query);
    output_search_results(query.trim(), &groups, cmd.output.json)
}
