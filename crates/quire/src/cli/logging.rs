//! Diagnostic logging for the CLI.

use std::io;

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Installs the global tracing subscriber.
///
/// Diagnostics go to stderr so command output on stdout stays clean. The level comes from
/// `RUST_LOG` and defaults to warnings.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
    // A subscriber may already be installed when the CLI is embedded; keep that one.
    if installed.is_err() {
        debug!("tracing subscriber already installed");
    }
}
