//! Implementation of `quire build`.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::mpsc::{self, RecvTimeoutError},
    time::{Duration, Instant},
};

use notify::{Event, EventKind, RecursiveMode, Watcher, event::ModifyKind};
use quire_config::format_path_for_display;
use quire_content::Debouncer;
use quire_index::{BuildStats, IndexBuilder, SilentReporter};
use tracing::{debug, info, warn};

use crate::cli::{
    args::BuildCommand,
    context::CommandContext,
    output::{dim, warning},
};

/// Builds the content artifacts, then optionally keeps rebuilding on changes.
pub fn run(ctx: &CommandContext, cmd: &BuildCommand) -> ExitCode {
    let code = build_once(ctx);
    if !cmd.watch {
        return code;
    }
    watch(ctx)
}

/// Runs one build and prints its summary.
fn build_once(ctx: &CommandContext) -> ExitCode {
    let builder = IndexBuilder::new(&ctx.config);
    match builder.build_and_write(&mut SilentReporter) {
        Ok(stats) => {
            print_summary(&stats, builder.output_dir(), &ctx.cwd);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: build failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the one-line build summary followed by anything that needs attention.
fn print_summary(stats: &BuildStats, output_dir: &Path, cwd: &Path) {
    println!(
        "Built metadata for {} pages and search index.",
        stats.documents
    );
    println!(
        "{}",
        dim(&format!(
            "   -> {}",
            format_path_for_display(output_dir, Some(cwd))
        ))
    );

    for (path, error) in &stats.skipped {
        println!(
            "   {}",
            warning(&format!("skipped {}: {error}", path.display()))
        );
    }
    if stats.duplicates > 0 {
        println!(
            "   {}",
            warning(&format!(
                "{} page(s) reuse a version/slug pair; lookups return the first",
                stats.duplicates
            ))
        );
    }
}

/// Watches the content tree and rebuilds after each burst of changes.
///
/// Only returns if the watcher cannot be started or stops delivering events.
fn watch(ctx: &CommandContext) -> ExitCode {
    let content_dir = &ctx.config.content.dir;
    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();

    let mut watcher = match notify::recommended_watcher(tx) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: failed to start file watcher: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = watcher.watch(content_dir, RecursiveMode::Recursive) {
        eprintln!("error: failed to watch {}: {e}", content_dir.display());
        return ExitCode::FAILURE;
    }

    println!(
        "{}",
        dim(&format!(
            "Watching {} for changes (Ctrl-C to stop)",
            format_path_for_display(content_dir, Some(&ctx.cwd))
        ))
    );

    let mut debouncer = Debouncer::new(Duration::from_millis(ctx.config.build.debounce_ms));
    loop {
        let received = match debouncer.deadline() {
            Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(Ok(event)) => {
                if let Some(path) = content_change(&event, &ctx.config.content.extensions) {
                    debug!(path = %path.display(), kind = ?event.kind, "content changed");
                    debouncer.input(path.display().to_string(), Instant::now());
                }
            }
            Ok(Err(e)) => warn!(error = %e, "file watcher error"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                eprintln!("error: file watcher stopped");
                return ExitCode::FAILURE;
            }
        }

        if let Some(last_change) = debouncer.poll(Instant::now()) {
            info!(path = %last_change, "rebuilding");
            // A failed rebuild has already been reported; keep watching.
            if build_once(ctx) != ExitCode::SUCCESS {
                warn!("rebuild failed; waiting for further changes");
            }
        }
    }
}

/// Returns the first path in `event` that can affect the build.
///
/// Access events are ignored. A path counts when it has one of the content extensions or
/// is a directory. Removals and renames always count, since the path may have been a
/// directory that no longer exists.
fn content_change<'a>(event: &'a Event, extensions: &[String]) -> Option<&'a Path> {
    let structural = match event.kind {
        EventKind::Access(_) => return None,
        EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_)) => true,
        _ => false,
    };
    event.paths.iter().map(PathBuf::as_path).find(|path| {
        let is_content = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)));
        is_content || structural || path.is_dir()
    })
}
