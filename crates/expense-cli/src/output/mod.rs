//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying transactions
//! in various formats (JSON, table, plain text).

mod json;
mod text;

// Re-export public API
pub use json::{status_json, total_json, transactions_json};
pub use text::{status_summary, total_amount, transaction_rows, TRANSACTION_COLUMNS};
