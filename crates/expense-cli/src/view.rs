//! The session's view: a store listener that reports every change.

use std::cell::Cell;

use expense_core::{StoreListener, TransactionStore};

use crate::output::{status_json, status_summary};
use crate::ui::{badge, kv, Badge, OutputMode, UiContext};

/// Prints a status line after each store change.
pub struct SessionView {
    ctx: UiContext,
    quiet: bool,
    updates: Cell<usize>,
}

impl SessionView {
    pub fn new(ctx: UiContext, quiet: bool) -> Self {
        Self {
            ctx,
            quiet,
            updates: Cell::new(0),
        }
    }

    /// Number of notifications received so far.
    pub fn updates(&self) -> usize {
        self.updates.get()
    }

    /// The line printed for the current store state, if any.
    pub fn render(&self, store: &TransactionStore) -> Option<String> {
        if self.quiet {
            return None;
        }
        let line = match self.ctx.mode {
            OutputMode::Json => status_json(store).to_string(),
            OutputMode::Pretty => badge(&self.ctx, Badge::Info, &status_summary(store)),
            OutputMode::Plain => format!(
                "changed {} {}",
                kv(&self.ctx, "transactions", &store.transaction_count().to_string()),
                kv(
                    &self.ctx,
                    "matched",
                    &store.matched_filter_indices().len().to_string()
                )
            ),
        };
        Some(line)
    }
}

impl StoreListener for SessionView {
    fn update(&self, store: &TransactionStore) {
        self.updates.set(self.updates.get() + 1);
        tracing::trace!(update = self.updates.get(), "view refreshed");
        if let Some(line) = self.render(store) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expense_core::{Category, Transaction};
    use rust_decimal_macros::dec;
    use std::rc::Rc;

    fn ctx(mode: OutputMode) -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            width: 80,
            mode,
        }
    }

    fn one_food_store() -> TransactionStore {
        let mut store = TransactionStore::new();
        store
            .add_transaction(Transaction::new(dec!(9.99), Category::Food).unwrap())
            .unwrap();
        store
    }

    #[test]
    fn test_plain_render() {
        let view = SessionView::new(ctx(OutputMode::Plain), false);
        let line = view.render(&one_food_store()).unwrap();
        assert_eq!(line, "changed transactions=1 matched=0");
    }

    #[test]
    fn test_pretty_render() {
        let view = SessionView::new(ctx(OutputMode::Pretty), false);
        let line = view.render(&one_food_store()).unwrap();
        assert_eq!(line, "[INFO] 1 transaction");
    }

    #[test]
    fn test_json_render() {
        let view = SessionView::new(ctx(OutputMode::Json), false);
        let line = view.render(&one_food_store()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["event"], "changed");
        assert_eq!(value["transactions"], 1);
    }

    #[test]
    fn test_quiet_renders_nothing() {
        let view = SessionView::new(ctx(OutputMode::Plain), true);
        assert!(view.render(&one_food_store()).is_none());
    }

    #[test]
    fn test_counts_notifications() {
        let view = Rc::new(SessionView::new(ctx(OutputMode::Plain), true));
        let mut store = TransactionStore::new();
        store.register(view.clone());
        store
            .add_transaction(Transaction::new(dec!(1), Category::Other).unwrap())
            .unwrap();
        store.set_matched_filter_indices(&[0]).unwrap();
        assert_eq!(view.updates(), 2);
    }
}
