//! Application context for the Expense CLI.
//!
//! Combines CLI arguments with the lazily-loaded config file so handlers
//! can resolve output settings without re-reading it.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use crate::cli::Cli;
use crate::config::{load_config, resolve_config_path, ExpenseConfig};
use crate::ui::{OutputFormat, UiContext};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<ExpenseConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Create a context around an already-loaded config.
    #[cfg(test)]
    pub fn with_config(cli: &'a Cli, config: ExpenseConfig) -> Self {
        Self {
            cli,
            config: OnceCell::from(config),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Path of the config file in effect (it may not exist).
    pub fn config_path(&self) -> anyhow::Result<PathBuf> {
        resolve_config_path(self.cli.config.as_deref())
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&ExpenseConfig> {
        self.config
            .get_or_try_init(|| load_config(&self.config_path()?))
    }

    /// UI settings for commands that must still work with a broken config:
    /// falls back to the flags alone when the config cannot be loaded.
    pub fn ui_or_flags(&self) -> UiContext {
        self.ui().unwrap_or_else(|err| {
            tracing::debug!(error = %err, "config unusable, using flags only");
            let format = self
                .cli
                .format
                .as_deref()
                .and_then(|value| value.parse::<OutputFormat>().ok());
            UiContext::from_env(self.cli.json, format, self.cli.no_color, self.cli.ascii)
        })
    }

    /// Resolve UI settings: flags first, then config.
    pub fn ui(&self) -> anyhow::Result<UiContext> {
        let config = self.config()?;
        let format = match self.cli.format.as_deref() {
            Some(value) => value.parse::<OutputFormat>()?,
            None => config.ui.format.parse::<OutputFormat>()?,
        };
        Ok(UiContext::from_env(
            self.cli.json,
            Some(format),
            self.cli.no_color || config.ui.no_color,
            self.cli.ascii || config.ui.ascii,
        ))
    }
}
