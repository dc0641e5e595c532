//! Implementation of `quire nav`.

use std::process::ExitCode;

use quire_content::LATEST_ALIAS;

use crate::cli::{args::NavCommand, context::CommandContext, output::output_navigation};

/// Prints the navigation tree of a version (the newest one by default).
pub fn run(ctx: &mut CommandContext, cmd: &NavCommand) -> ExitCode {
    let service = match ctx.service() {
        Ok(s) => s,
        Err(code) => return code,
    };

    let requested = cmd.version.as_deref().unwrap_or(LATEST_ALIAS);
    let version = if requested == LATEST_ALIAS {
        match service.latest_version() {
            Some(v) => v,
            None => {
                eprintln!("error: no content versions found");
                return ExitCode::FAILURE;
            }
        }
    } else {
        requested
    };

    if !service.versions().contains(&version) {
        eprintln!("error: unknown version: {version}");
        return ExitCode::FAILURE;
    }
    output_navigation(version, &service.navigation(version), cmd.output.json)
}
