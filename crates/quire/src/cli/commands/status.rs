//! Implementation of `quire status`.

use std::process::ExitCode;

use quire_config::{ConfigWarning, discover_config_file, format_path_for_display};
use quire_index::artifact_status;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows the config file, content directory, artifacts and validation warnings.
///
/// Exits with failure when there are warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = &ctx.cwd;
    let config = &ctx.config;

    println!("{}", subheader("Config file:"));
    match discover_config_file(cwd) {
        Some(path) => println!("   {}", format_path_for_display(&path, Some(cwd))),
        None => {
            println!("   {}", dim("(none, using defaults)"));
            println!(
                "   {}",
                dim(&format!("Run {} to create one.", subheader("quire init")))
            );
        }
    }
    println!();

    let content_dir = format_path_for_display(&config.content.dir, Some(cwd));
    println!("{}", subheader("Content:"));
    if config.content.dir.is_dir() {
        println!(
            "   {content_dir} {}",
            dim(&format!("(*.{})", config.content.extensions.join(", *.")))
        );
    } else {
        println!("   {content_dir} {}", warning("[missing]"));
    }
    println!();

    println!("{}", subheader("Artifacts:"));
    for artifact in artifact_status(&config.output.dir) {
        let path = format_path_for_display(&artifact.path, Some(cwd));
        match artifact.size {
            Some(size) => println!("   {path} {}", dim(&format!("({size} bytes)"))),
            None => println!("   {path} {}", warning("[not built]")),
        }
    }
    let base = ctx.artifact_base();
    if base != config.output.dir.to_string_lossy() {
        println!("   {}", dim(&format!("served from {base}")));
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::ContentDirMissing { .. } => {
                println!(
                    "{}",
                    dim("Hint: create the content directory or set [content] dir in .quire.toml")
                );
            }
            ConfigWarning::NoVersionDirectories { .. } => {
                println!(
                    "{}",
                    dim("Hint: pages live at <content>/<version>/<slug>.mdx")
                );
            }
            _ => {}
        }
    }
}
