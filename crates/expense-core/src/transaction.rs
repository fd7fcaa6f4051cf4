//! The expense record held by the store.
//!
//! A transaction is an amount, a category, and the moment it was recorded.
//! The store only relies on equality (for removal) and on [`Transaction::validate`]
//! (for insertion); everything else is for the application around it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, Result};

/// Exclusive upper bound for a single transaction amount.
pub const MAX_AMOUNT: Decimal = Decimal::ONE_THOUSAND;

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Travel,
    Bills,
    Entertainment,
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Travel,
        Category::Bills,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Travel => "travel",
            Self::Bills => "bills",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ExpenseError;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                ExpenseError::InvalidInput(format!(
                    "Unknown category \"{}\" (expected one of: {})",
                    value.trim(),
                    names.join(", ")
                ))
            })
    }
}

/// Check that an amount lies in the accepted open range `(0, 1000)`.
pub fn validate_amount(amount: Decimal) -> std::result::Result<(), String> {
    if amount <= Decimal::ZERO {
        return Err(format!("amount must be greater than 0, got {}", amount));
    }
    if amount >= MAX_AMOUNT {
        return Err(format!(
            "amount must be less than {}, got {}",
            MAX_AMOUNT, amount
        ));
    }
    Ok(())
}

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Amount spent, in the range `(0, 1000)`
    pub amount: Decimal,

    /// What the money was spent on
    pub category: Category,

    /// When this transaction was recorded
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Create a transaction stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::InvalidTransaction` if the amount is outside `(0, 1000)`.
    pub fn new(amount: Decimal, category: Category) -> Result<Self> {
        Self::with_timestamp(amount, category, Utc::now())
    }

    /// Create a transaction with an explicit timestamp.
    pub fn with_timestamp(
        amount: Decimal,
        category: Category,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        let transaction = Self {
            amount,
            category,
            timestamp,
        };
        transaction.validate()?;
        Ok(transaction)
    }

    /// Re-check field ranges.
    ///
    /// Values built through the constructors are always valid; this guards
    /// values assembled field by field or deserialized.
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount).map_err(ExpenseError::InvalidTransaction)
    }
}
