//! UI context for environment detection and configuration.

use std::io::IsTerminal;

use super::mode::{OutputFormat, OutputMode};

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
    /// Terminal width (columns)
    pub width: usize,
    /// Resolved output mode
    pub mode: OutputMode,
}

impl UiContext {
    /// Create context from the environment and already-merged flags.
    ///
    /// # Arguments
    /// * `json_flag` - Whether `--json` was passed
    /// * `format` - `--format`, or the configured default
    /// * `no_color` - `--no-color` or `ui.no_color`
    /// * `ascii` - `--ascii` or `ui.ascii`
    pub fn from_env(
        json_flag: bool,
        format: Option<OutputFormat>,
        no_color: bool,
        ascii: bool,
    ) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        Self {
            color: is_tty && !no_color && !no_color_env && !term_is_dumb,
            unicode: !ascii,
            width: terminal_width().unwrap_or(80),
            mode: OutputMode::resolve(json_flag, format, is_tty, term_is_dumb),
        }
    }

    /// Whether stdin is attached to a terminal (session prompt is shown).
    pub fn is_interactive(&self) -> bool {
        self.mode.is_pretty() && std::io::stdin().is_terminal()
    }
}

/// Get terminal width, falling back to 80.
fn terminal_width() -> Option<usize> {
    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 {
                return Some(width);
            }
        }
    }

    #[cfg(unix)]
    {
        use std::mem::MaybeUninit;

        let mut winsize = MaybeUninit::<libc::winsize>::uninit();
        // SAFETY: TIOCGWINSZ only writes into the provided winsize buffer
        let result =
            unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
        if result == 0 {
            // SAFETY: ioctl returned success, so the buffer was filled
            let ws = unsafe { winsize.assume_init() };
            if ws.ws_col > 0 {
                return Some(ws.ws_col as usize);
            }
        }
    }

    None
}
