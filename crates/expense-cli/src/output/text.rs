//! Text and table output formatting for transactions.

use expense_core::{Transaction, TransactionStore};
use rust_decimal::Decimal;

use crate::ui::theme::MATCH_MARKER;
use crate::ui::{format_amount, format_datetime, Column, UiContext};

pub const TRANSACTION_COLUMNS: [Column; 5] = [
    Column::right("#"),
    Column::right("Amount"),
    Column::new("Category"),
    Column::new("Date"),
    Column::new("Match"),
];

/// One display row per transaction; matched rows carry the match marker.
///
/// Plain rows always have five fields, so unmatched rows get `-`.
pub fn transaction_rows(
    ctx: &UiContext,
    transactions: &[Transaction],
    matched: &[usize],
) -> Vec<Vec<String>> {
    transactions
        .iter()
        .enumerate()
        .map(|(index, transaction)| {
            let marker = if matched.contains(&index) {
                MATCH_MARKER.get(ctx.unicode)
            } else if ctx.mode.is_pretty() {
                ""
            } else {
                "-"
            };
            vec![
                (index + 1).to_string(),
                format_amount(transaction.amount),
                transaction.category.to_string(),
                format_datetime(&transaction.timestamp, ctx.mode.is_pretty()),
                marker.to_string(),
            ]
        })
        .collect::<Vec<_>>()
}

/// Sum of all stored amounts.
pub fn total_amount(store: &TransactionStore) -> Decimal {
    store.transactions().iter().map(|t| t.amount).sum()
}

/// One-line store summary, e.g. `3 transactions, 1 matched`.
pub fn status_summary(store: &TransactionStore) -> String {
    let matched = store.matched_filter_indices().len();
    let mut summary = crate::ui::count_label(store.transaction_count(), "transaction");
    if matched > 0 {
        summary.push_str(&format!(", {} matched", matched));
    }
    summary
}
