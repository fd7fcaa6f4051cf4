//! Tracing subscriber setup.

use std::str::FromStr;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Pick the filter directive: `-v` flags beat the configured level.
///
/// `RUST_LOG`, when set, is honored by [`init_logging`] before this is used.
/// The configured value must be a plain level name.
pub fn log_directive(verbose: u8, configured: &str) -> anyhow::Result<String> {
    match verbose {
        0 => {
            let level = configured.trim().to_lowercase();
            LevelFilter::from_str(&level).map_err(|_| {
                anyhow::anyhow!(
                    "Invalid log level \"{}\" (use off, error, warn, info, debug or trace)",
                    configured.trim()
                )
            })?;
            Ok(level)
        }
        1 => Ok("debug".to_string()),
        _ => Ok("trace".to_string()),
    }
}

/// Install the global subscriber, writing to stderr so stdout stays parseable.
pub fn init_logging(verbose: u8, configured: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = log_directive(verbose, configured)?;
            EnvFilter::try_new(&directive)
                .map_err(|e| anyhow::anyhow!("Invalid log level \"{}\": {}", directive, e))?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
