//! Clap argument definitions for the `quire` CLI.

use std::{env, process::exit};

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};

/// Environment variable that overrides where artifacts are loaded from.
pub const BASE_PATH_ENV: &str = "QUIRE_BASE_PATH";

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Build and query versioned documentation content")]
pub struct Cli {
    /// Load artifacts from this directory or http(s) URL instead of the configured location
    #[arg(long, global = true, env = BASE_PATH_ENV, value_name = "PREFIX")]
    pub base_path: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flag.
#[derive(Args, Debug, Clone, Default)]
pub struct JsonArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `quire init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `quire build`.
#[derive(Args, Debug, Clone)]
pub struct BuildCommand {
    /// Keep running and rebuild whenever the content tree changes
    #[arg(short = 'w', long)]
    pub watch: bool,
}

/// Arguments for `quire search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search words; every word must prefix-match within one field
    #[arg(required = true)]
    pub query: Vec<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,
}

impl SearchCommand {
    /// Returns the query words joined into one query string.
    pub fn query_string(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for `quire get`.
#[derive(Args, Debug, Clone)]
pub struct GetCommand {
    /// Version name, or `latest`
    pub version: String,

    /// Page slug; omit for the version's first page
    pub slug: Option<String>,

    /// Show the page outline (headings)
    #[arg(long, conflicts_with = "raw")]
    pub outline: bool,

    /// Print the page source
    #[arg(long)]
    pub raw: bool,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,
}

/// Arguments for `quire nav`.
#[derive(Args, Debug, Clone)]
pub struct NavCommand {
    /// Version to show [default: latest]
    pub version: Option<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,
}

/// Supported `quire` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a .quire.toml in the current directory
    Init(InitCommand),

    /// Build the content artifacts
    Build(BuildCommand),

    /// Search page titles, descriptions and content
    #[command(after_help = "\
MATCHING:
  Words match by prefix: \"surr\" finds \"Surround\".
  Every word must match within the same field (title, description or content).
  Queries shorter than the configured minimum (default 2 characters) return nothing.

EXAMPLES:
  quire search surround
  quire search 'surround sound'
  quire search --json audio")]
    Search(SearchCommand),

    /// Show a page by version and slug
    #[command(after_help = "\
EXAMPLES:
  quire get latest                 First page of the newest version
  quire get latest intro           Newest version that has 'intro'
  quire get v1.0 intro --outline   Headings of a page
  quire get v1.0 intro --raw       Page source")]
    Get(GetCommand),

    /// Show the navigation tree of a version
    Nav(NavCommand),

    /// List content versions, newest first
    Versions(JsonArgs),

    /// Show configuration, content and artifact status
    Status,

    /// Show effective configuration settings
    Config,
}

/// Parses CLI arguments, printing a compact command list for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_command_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints top-level help with one line per subcommand.
fn print_command_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: quire [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");
    }

    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("      --base-path <PREFIX>  Artifact location override [env: {BASE_PATH_ENV}=]");
    println!("  -h, --help                Print help");
}
