//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use quire_config::Config;
use quire_content::{ContentService, source_for};
use tracing::debug;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (defaults rooted at `cwd` if no config file was found).
    pub config: Config,
    /// Artifact location override from `--base-path` or the environment.
    base_path: Option<String>,
    /// Content service loaded on first use.
    service: Option<ContentService>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(base_path: Option<String>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            base_path,
            service: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only(base_path: Option<String>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = Config::defaults_in(&cwd);
        Ok(Self {
            cwd,
            config,
            base_path,
            service: None,
        })
    }

    /// Returns where artifacts are loaded from.
    ///
    /// A non-empty `--base-path` wins over the configured location.
    pub fn artifact_base(&self) -> String {
        match self.base_path.as_deref() {
            Some(base) if !base.is_empty() => base.to_string(),
            _ => self.config.artifact_base(),
        }
    }

    /// Returns the content service, loading artifacts on first use.
    ///
    /// A failed load prints the error and yields a failure exit code.
    pub fn service(&mut self) -> Result<&ContentService, ExitCode> {
        let service = match self.service.take() {
            Some(service) => service,
            None => self.load_service()?,
        };
        Ok(self.service.insert(service))
    }

    /// Loads a fresh content service from the artifact location.
    fn load_service(&self) -> Result<ContentService, ExitCode> {
        let base = self.artifact_base();
        debug!(base = %base, "loading content artifacts");

        let source = source_for(&base).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;

        let mut service = ContentService::from_settings(&self.config.search);
        service.load(source.as_ref());

        if let Some(message) = service.error() {
            eprintln!("error: {message}");
            eprintln!("Run 'quire build' to generate the content artifacts.");
            return Err(ExitCode::FAILURE);
        }
        Ok(service)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
