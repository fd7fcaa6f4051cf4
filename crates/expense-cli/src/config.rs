use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseConfig {
    #[serde(default)]
    pub ui: UiSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSection {
    /// Default output format when `--format` is not given (table or plain)
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub ascii: bool,
    #[serde(default)]
    pub no_color: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            format: default_format(),
            ascii: false,
            no_color: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Level used when neither `RUST_LOG` nor `-v` is set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_format() -> String {
    "table".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Resolve the config file path: `--config` / `EXPENSE_CONFIG` first, then the XDG default.
pub fn resolve_config_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}

pub fn read_config(path: &Path) -> anyhow::Result<ExpenseConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Read the config at `path`, or fall back to defaults when no file exists.
pub fn load_config(path: &Path) -> anyhow::Result<ExpenseConfig> {
    if path.exists() {
        read_config(path)
    } else {
        Ok(ExpenseConfig::default())
    }
}

pub fn write_config(path: &Path, config: &ExpenseConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("expense"));
        }
    }
    Ok(home_dir()?.join(".config").join("expense"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
