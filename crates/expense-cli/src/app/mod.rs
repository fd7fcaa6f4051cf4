//! Application-level utilities for the Expense CLI.
//!
//! This module provides:
//! - The `AppContext` shared by command handlers
//! - Logging setup

mod context;
mod logging;

// Re-export public API
pub use context::AppContext;
pub use logging::init_logging;
