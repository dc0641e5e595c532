//! Command implementations and dispatch.

pub mod build;
pub mod config;
pub mod get;
pub mod init;
pub mod nav;
pub mod search;
pub mod status;
pub mod versions;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Build(cmd) => build::run(ctx, &cmd),
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Get(cmd) => get::run(ctx, &cmd),
        Commands::Nav(cmd) => nav::run(ctx, &cmd),
        Commands::Versions(cmd) => versions::run(ctx, &cmd),
        Commands::Status => status::run(ctx),
        Commands::Config => config::run(ctx),
    }
}
