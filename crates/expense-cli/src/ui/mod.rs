//! UI primitives for the Expense CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, styles, symbols
//! - **Render**: Tables, headers, hints, error lines
//! - **Format**: Amounts, datetimes, counts

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::UiContext;
pub use mode::{OutputFormat, OutputMode};
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{badge, header, kv, print, print_error, table, Column};

// Re-export commonly used format functions
pub use format::{count_label, format_amount, format_datetime};
