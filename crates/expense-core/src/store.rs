//! In-memory transaction store with change notification.
//!
//! `TransactionStore` owns three things:
//!
//! - the ordered list of transactions (insertion order, duplicates allowed)
//! - a cache of matched filter indices supplied by the caller
//! - the registered [`StoreListener`]s
//!
//! Every successful mutation ends by notifying each listener once, in
//! registration order. Adding or removing a transaction always empties the
//! filter cache first, so listeners never observe indices that point at a
//! list they were not computed for.

use std::fmt;
use std::rc::Rc;

use crate::error::{ExpenseError, Result};
use crate::transaction::Transaction;

/// Receives a notification after every state change of a [`TransactionStore`].
///
/// The listener gets the store itself rather than a diff; it re-reads
/// [`TransactionStore::transactions`] and
/// [`TransactionStore::matched_filter_indices`] to see what changed. The
/// borrow is shared, so a listener cannot mutate the store mid-notification.
pub trait StoreListener {
    fn update(&self, store: &TransactionStore);
}

impl<F> StoreListener for F
where
    F: Fn(&TransactionStore),
{
    fn update(&self, store: &TransactionStore) {
        self(store)
    }
}

/// Listener identity is the allocation, not the vtable.
fn same_listener(a: &Rc<dyn StoreListener>, b: &Rc<dyn StoreListener>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Ordered transactions, cached filter matches, and the listeners watching them.
#[derive(Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    matched_filter_indices: Vec<usize>,
    listeners: Vec<Rc<dyn StoreListener>>,
}

impl TransactionStore {
    /// Create an empty store with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction.
    ///
    /// Clears the matched filter indices and notifies listeners.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::InvalidTransaction` if the transaction fails
    /// validation; the store is left untouched and nobody is notified.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<()> {
        if let Err(err) = transaction.validate() {
            tracing::debug!(error = %err, "rejected transaction");
            return Err(err);
        }

        self.transactions.push(transaction);
        self.matched_filter_indices.clear();
        tracing::debug!(count = self.transactions.len(), "transaction added");
        self.state_changed();
        Ok(())
    }

    /// Remove the first transaction equal to `transaction`.
    ///
    /// Returns whether anything was removed. The filter cache is cleared and
    /// listeners are notified even when nothing matched.
    pub fn remove_transaction(&mut self, transaction: &Transaction) -> bool {
        let removed = match self.transactions.iter().position(|t| t == transaction) {
            Some(position) => {
                self.transactions.remove(position);
                true
            }
            None => false,
        };

        self.matched_filter_indices.clear();
        tracing::debug!(
            removed,
            count = self.transactions.len(),
            "transaction removal"
        );
        self.state_changed();
        removed
    }

    /// Stored transactions in insertion order.
    ///
    /// The slice is read-only; use `.to_vec()` for an owned snapshot that is
    /// unaffected by later mutations.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of stored transactions.
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Replace the matched filter indices with a copy of `indices`.
    ///
    /// Order and duplicates are kept as given.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::InvalidFilterIndex` for the first index that
    /// is not below the current transaction count. All indices are checked
    /// before anything is written, so a failure leaves the previous indices
    /// in place and notifies nobody.
    pub fn set_matched_filter_indices(&mut self, indices: &[usize]) -> Result<()> {
        let len = self.transactions.len();
        if let Some(&index) = indices.iter().find(|&&index| index >= len) {
            tracing::debug!(index, len, "rejected matched filter indices");
            return Err(ExpenseError::InvalidFilterIndex { index, len });
        }

        self.matched_filter_indices.clear();
        self.matched_filter_indices.extend_from_slice(indices);
        tracing::debug!(
            matched = self.matched_filter_indices.len(),
            "matched filter indices set"
        );
        self.state_changed();
        Ok(())
    }

    /// Cached matched filter indices (empty after any add or remove).
    pub fn matched_filter_indices(&self) -> &[usize] {
        &self.matched_filter_indices
    }

    /// Register a listener for state change notifications.
    ///
    /// Returns `true` if the listener was added, `false` if this same
    /// listener (by pointer identity) is already registered.
    pub fn register(&mut self, listener: Rc<dyn StoreListener>) -> bool {
        if self.contains_listener(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Remove a previously registered listener.
    ///
    /// Returns `false` if the listener was not registered.
    pub fn unregister(&mut self, listener: &Rc<dyn StoreListener>) -> bool {
        let before = self.listeners.len();
        self.listeners
            .retain(|registered| !same_listener(registered, listener));
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn number_of_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Whether this exact listener is registered.
    pub fn contains_listener(&self, listener: &Rc<dyn StoreListener>) -> bool {
        self.listeners
            .iter()
            .any(|registered| same_listener(registered, listener))
    }

    /// A panicking listener unwinds out of the mutating call; listeners
    /// after it are not notified.
    fn state_changed(&self) {
        for listener in &self.listeners {
            tracing::trace!("notifying listener");
            listener.update(self);
        }
    }
}

impl fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionStore")
            .field("transactions", &self.transactions)
            .field("matched_filter_indices", &self.matched_filter_indices)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Category;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::cell::{Cell, RefCell};

    fn tx(amount: Decimal, category: Category) -> Transaction {
        Transaction::new(amount, category).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        calls: Cell<usize>,
        seen_counts: RefCell<Vec<usize>>,
    }

    impl StoreListener for Recorder {
        fn update(&self, store: &TransactionStore) {
            self.calls.set(self.calls.get() + 1);
            self.seen_counts.borrow_mut().push(store.transaction_count());
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = TransactionStore::new();
        assert!(store.transactions().is_empty());
        assert!(store.matched_filter_indices().is_empty());
        assert_eq!(store.number_of_listeners(), 0);
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = TransactionStore::new();
        let first = tx(dec!(10), Category::Food);
        let second = tx(dec!(20), Category::Bills);
        store.add_transaction(first.clone()).unwrap();
        store.add_transaction(second.clone()).unwrap();
        assert_eq!(store.transactions(), &[first, second]);
    }

    #[test]
    fn test_add_allows_duplicates() {
        let mut store = TransactionStore::new();
        let t = tx(dec!(4.20), Category::Other);
        store.add_transaction(t.clone()).unwrap();
        store.add_transaction(t.clone()).unwrap();
        assert_eq!(store.transaction_count(), 2);
    }

    #[test]
    fn test_add_rejects_invalid_without_mutation_or_notification() {
        let mut store = TransactionStore::new();
        let recorder = Rc::new(Recorder::default());
        store.register(recorder.clone());

        let bogus = Transaction {
            amount: dec!(-1),
            category: Category::Food,
            timestamp: Utc::now(),
        };
        let err = store.add_transaction(bogus).unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidTransaction(_)));
        assert!(store.transactions().is_empty());
        assert_eq!(recorder.calls.get(), 0);
    }

    #[test]
    fn test_add_clears_matched_indices() {
        let mut store = TransactionStore::new();
        store.add_transaction(tx(dec!(1), Category::Food)).unwrap();
        store.set_matched_filter_indices(&[0]).unwrap();
        store.add_transaction(tx(dec!(2), Category::Food)).unwrap();
        assert!(store.matched_filter_indices().is_empty());
    }

    #[test]
    fn test_remove_first_equal_only() {
        let mut store = TransactionStore::new();
        let dup = tx(dec!(7), Category::Travel);
        let other = tx(dec!(8), Category::Travel);
        store.add_transaction(dup.clone()).unwrap();
        store.add_transaction(other.clone()).unwrap();
        store.add_transaction(dup.clone()).unwrap();

        assert!(store.remove_transaction(&dup));
        assert_eq!(store.transactions(), &[other, dup]);
    }

    #[test]
    fn test_remove_absent_still_clears_and_notifies() {
        let mut store = TransactionStore::new();
        store.add_transaction(tx(dec!(1), Category::Food)).unwrap();
        store.set_matched_filter_indices(&[0]).unwrap();

        let recorder = Rc::new(Recorder::default());
        store.register(recorder.clone());

        let absent = tx(dec!(99), Category::Bills);
        assert!(!store.remove_transaction(&absent));
        assert_eq!(store.transaction_count(), 1);
        assert!(store.matched_filter_indices().is_empty());
        assert_eq!(recorder.calls.get(), 1);
    }

    #[test]
    fn test_set_indices_preserves_order_and_duplicates() {
        let mut store = TransactionStore::new();
        for amount in [dec!(1), dec!(2), dec!(3)] {
            store.add_transaction(tx(amount, Category::Food)).unwrap();
        }
        store.set_matched_filter_indices(&[2, 0, 2]).unwrap();
        assert_eq!(store.matched_filter_indices(), &[2, 0, 2]);
    }

    #[test]
    fn test_set_indices_rejects_out_of_range_atomically() {
        let mut store = TransactionStore::new();
        store.add_transaction(tx(dec!(1), Category::Food)).unwrap();
        store.add_transaction(tx(dec!(2), Category::Food)).unwrap();
        store.set_matched_filter_indices(&[1]).unwrap();

        let recorder = Rc::new(Recorder::default());
        store.register(recorder.clone());

        let err = store.set_matched_filter_indices(&[0, 2]).unwrap_err();
        assert_eq!(err, ExpenseError::InvalidFilterIndex { index: 2, len: 2 });
        assert_eq!(store.matched_filter_indices(), &[1]);
        assert_eq!(recorder.calls.get(), 0);
    }

    #[test]
    fn test_set_indices_on_empty_store() {
        let mut store = TransactionStore::new();
        assert!(store.set_matched_filter_indices(&[]).is_ok());
        assert!(store.set_matched_filter_indices(&[0]).is_err());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut store = TransactionStore::new();
        let listener: Rc<dyn StoreListener> = Rc::new(Recorder::default());
        assert!(store.register(listener.clone()));
        assert!(!store.register(listener.clone()));
        assert_eq!(store.number_of_listeners(), 1);
        assert!(store.contains_listener(&listener));
    }

    #[test]
    fn test_distinct_listeners_with_equal_state_are_distinct() {
        let mut store = TransactionStore::new();
        assert!(store.register(Rc::new(Recorder::default())));
        assert!(store.register(Rc::new(Recorder::default())));
        assert_eq!(store.number_of_listeners(), 2);
    }

    #[test]
    fn test_contains_listener_unregistered() {
        let store = TransactionStore::new();
        let listener: Rc<dyn StoreListener> = Rc::new(Recorder::default());
        assert!(!store.contains_listener(&listener));
    }

    #[test]
    fn test_unregister() {
        let mut store = TransactionStore::new();
        let recorder = Rc::new(Recorder::default());
        let listener: Rc<dyn StoreListener> = recorder.clone();
        store.register(listener.clone());

        assert!(store.unregister(&listener));
        assert!(!store.unregister(&listener));
        assert_eq!(store.number_of_listeners(), 0);

        store.add_transaction(tx(dec!(1), Category::Food)).unwrap();
        assert_eq!(recorder.calls.get(), 0);
    }

    #[test]
    fn test_listener_sees_post_mutation_state() {
        let mut store = TransactionStore::new();
        let recorder = Rc::new(Recorder::default());
        store.register(recorder.clone());

        let t = tx(dec!(3), Category::Bills);
        store.add_transaction(t.clone()).unwrap();
        store.add_transaction(tx(dec!(4), Category::Bills)).unwrap();
        store.remove_transaction(&t);

        assert_eq!(*recorder.seen_counts.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn test_closure_listener() {
        let mut store = TransactionStore::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        store.register(Rc::new(move |_: &TransactionStore| {
            counter.set(counter.get() + 1)
        }));

        store.add_transaction(tx(dec!(1), Category::Food)).unwrap();
        store.set_matched_filter_indices(&[0]).unwrap();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_notification_order_is_registration_order() {
        let mut store = TransactionStore::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let log = log.clone();
            store.register(Rc::new(move |_: &TransactionStore| {
                log.borrow_mut().push(name)
            }));
        }

        store.add_transaction(tx(dec!(1), Category::Food)).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_debug_reports_listener_count() {
        let mut store = TransactionStore::new();
        store.register(Rc::new(|_: &TransactionStore| {}));
        let rendered = format!("{:?}", store);
        assert!(rendered.contains("listeners: 1"));
    }
}
