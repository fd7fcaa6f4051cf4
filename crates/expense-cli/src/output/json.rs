//! JSON output formatting for transactions.

use expense_core::{Transaction, TransactionStore};
use rust_decimal::Decimal;

/// Convert a transaction to JSON for output. `row` is 1-based.
pub fn transaction_json(row: usize, transaction: &Transaction, matched: bool) -> serde_json::Value {
    serde_json::json!({
        "row": row,
        "amount": transaction.amount,
        "category": transaction.category,
        "timestamp": transaction.timestamp,
        "matched": matched,
    })
}

/// Convert every stored transaction to JSON, flagging filter matches.
pub fn transactions_json(store: &TransactionStore) -> Vec<serde_json::Value> {
    let matched = store.matched_filter_indices();
    store
        .transactions()
        .iter()
        .enumerate()
        .map(|(index, transaction)| {
            transaction_json(index + 1, transaction, matched.contains(&index))
        })
        .collect()
}

/// Total as a JSON object; the amount is a string to keep decimal precision.
pub fn total_json(total: Decimal, count: usize) -> serde_json::Value {
    serde_json::json!({
        "total": total.to_string(),
        "count": count,
    })
}

/// Store summary emitted after every change.
pub fn status_json(store: &TransactionStore) -> serde_json::Value {
    serde_json::json!({
        "event": "changed",
        "transactions": store.transaction_count(),
        "matched": store.matched_filter_indices(),
    })
}
