//! Filters that select transactions and publish the result to the store.
//!
//! The store never decides what matches; a filter computes the indices and
//! [`apply_filter`] hands them over through
//! [`TransactionStore::set_matched_filter_indices`].

use rust_decimal::Decimal;

use crate::error::{ExpenseError, Result};
use crate::store::TransactionStore;
use crate::transaction::{validate_amount, Category, Transaction};

/// Predicate over transactions.
pub trait TransactionFilter {
    /// Whether a single transaction is selected.
    fn matches(&self, transaction: &Transaction) -> bool;

    /// Positions of all selected transactions, ascending.
    fn matching_indices(&self, transactions: &[Transaction]) -> Vec<usize> {
        transactions
            .iter()
            .enumerate()
            .filter(|(_, transaction)| self.matches(transaction))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Selects transactions with exactly the given amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountFilter {
    amount: Decimal,
}

impl AmountFilter {
    /// # Errors
    ///
    /// Returns `ExpenseError::InvalidInput` when no transaction could ever
    /// have this amount.
    pub fn new(amount: Decimal) -> Result<Self> {
        validate_amount(amount).map_err(ExpenseError::InvalidInput)?;
        Ok(Self { amount })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl TransactionFilter for AmountFilter {
    fn matches(&self, transaction: &Transaction) -> bool {
        transaction.amount == self.amount
    }
}

/// Selects transactions in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFilter {
    category: Category,
}

impl CategoryFilter {
    pub fn new(category: Category) -> Self {
        Self { category }
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

impl TransactionFilter for CategoryFilter {
    fn matches(&self, transaction: &Transaction) -> bool {
        transaction.category == self.category
    }
}

/// Run `filter` over the store's transactions and store the matches.
///
/// Listeners are notified once, through the store. Returns the indices that
/// were stored.
pub fn apply_filter(
    store: &mut TransactionStore,
    filter: &dyn TransactionFilter,
) -> Result<Vec<usize>> {
    let indices = filter.matching_indices(store.transactions());
    store.set_matched_filter_indices(&indices)?;
    Ok(indices)
}
