//! Command-line interface for `quire`.

use std::process::ExitCode;

use quire::cli::{
    args::{Commands, parse_cli},
    commands,
    context::CommandContext,
    logging::init_tracing,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    init_tracing();

    // `init` must work even when an existing config file is broken.
    let ctx = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only(cli.base_path)
    } else {
        CommandContext::load(cli.base_path)
    };
    let mut ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &mut ctx)
}
