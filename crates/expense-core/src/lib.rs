//! # Expense Core
//!
//! Core library for Expense - the data-holding layer of a small
//! expense-tracking application.
//!
//! This crate keeps transactions in memory, caches which of them match the
//! filter the application last applied, and tells registered listeners
//! whenever any of that changes. It does not persist or render anything.
//!
//! ## Architecture
//!
//! - **store**: `TransactionStore` and the `StoreListener` trait
//! - **transaction**: the `Transaction` record and its `Category`
//! - **filter**: amount and category filters that feed matched indices back
//!   into the store
//! - **error**: `ExpenseError` and the crate `Result` alias

pub mod error;
pub mod filter;
pub mod store;
pub mod transaction;

pub use error::{ExpenseError, Result};
pub use filter::{apply_filter, AmountFilter, CategoryFilter, TransactionFilter};
pub use store::{StoreListener, TransactionStore};
pub use transaction::{Category, Transaction, MAX_AMOUNT};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
