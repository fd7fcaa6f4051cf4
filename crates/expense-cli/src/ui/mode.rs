//! Output mode routing logic.

use std::str::FromStr;

/// Requested text format (`--format` or `ui.format` in config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.trim() {
            "table" => Ok(Self::Table),
            "plain" => Ok(Self::Plain),
            other => Err(anyhow::anyhow!(
                "Unsupported format: {} (use table or plain)",
                other
            )),
        }
    }
}

/// Output mode determines how results are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON lines only
    Json,
    /// Plain text, stable for logs and scripts
    #[default]
    Plain,
    /// Tables, badges and colors (TTY only)
    Pretty,
}

impl OutputMode {
    /// Resolve output mode from flags and environment.
    ///
    /// Routing rules, first match wins:
    /// 1. `--json`
    /// 2. plain format requested
    /// 3. `TERM=dumb` or stdout is not a TTY gives plain
    /// 4. otherwise pretty
    pub fn resolve(
        json_flag: bool,
        format: Option<OutputFormat>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        if format == Some(OutputFormat::Plain) {
            return Self::Plain;
        }
        if term_is_dumb || !is_tty {
            return Self::Plain;
        }
        Self::Pretty
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
