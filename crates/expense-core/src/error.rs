//! Error types for expense core operations.
//!
//! Every error is raised before any mutation happens, so a failed call
//! leaves the store exactly as it was. The CLI layer maps these to
//! user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for expense operations.
pub type Result<T> = std::result::Result<T, ExpenseError>;

/// Core error type for expense operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    /// A transaction with out-of-range fields was offered to the store
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// A matched filter index does not point at a stored transaction
    #[error(
        "Invalid filter index {index}: each matched filter index must be between 0 (inclusive) and the number of transactions ({len}, exclusive)"
    )]
    InvalidFilterIndex { index: usize, len: usize },

    /// Invalid user input (filter values, category names, amounts)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
