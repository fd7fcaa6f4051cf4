use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use expense_core::{
    apply_filter, Category, CategoryFilter, ExpenseError, StoreListener, Transaction,
    TransactionStore,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Listener that counts notifications and keeps a copy of what it saw.
#[derive(Default)]
struct ViewProbe {
    updates: Cell<usize>,
    last_transactions: RefCell<Vec<Transaction>>,
    last_matches: RefCell<Vec<usize>>,
}

impl StoreListener for ViewProbe {
    fn update(&self, store: &TransactionStore) {
        self.updates.set(self.updates.get() + 1);
        *self.last_transactions.borrow_mut() = store.transactions().to_vec();
        *self.last_matches.borrow_mut() = store.matched_filter_indices().to_vec();
    }
}

fn tx(amount: Decimal, category: Category, second: u32) -> Transaction {
    let at = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, second)
        .single()
        .expect("valid timestamp");
    Transaction::with_timestamp(amount, category, at).expect("valid transaction")
}

#[test]
fn test_walkthrough_register_add_filter_add_reject() {
    // New store
    let mut store = TransactionStore::new();
    assert_eq!(store.number_of_listeners(), 0);
    assert!(store.transactions().is_empty());

    // Idempotent registration
    let probe = Rc::new(ViewProbe::default());
    let listener: Rc<dyn StoreListener> = probe.clone();
    assert!(store.register(listener.clone()));
    assert!(!store.register(listener.clone()));
    assert_eq!(store.number_of_listeners(), 1);

    // Add notifies once
    let t1 = tx(dec!(25), Category::Food, 1);
    store.add_transaction(t1.clone()).unwrap();
    assert_eq!(probe.updates.get(), 1);
    assert_eq!(store.transactions(), &[t1.clone()]);

    // Valid filter indices
    store.set_matched_filter_indices(&[0]).unwrap();
    assert_eq!(store.matched_filter_indices(), &[0]);
    assert_eq!(probe.updates.get(), 2);
    assert_eq!(*probe.last_matches.borrow(), vec![0]);

    // Adding clears the filter
    let t2 = tx(dec!(60), Category::Travel, 2);
    store.add_transaction(t2.clone()).unwrap();
    assert!(store.matched_filter_indices().is_empty());
    assert_eq!(store.transactions(), &[t1, t2]);
    assert_eq!(probe.updates.get(), 3);

    // Out-of-range index is rejected and changes nothing
    let err = store.set_matched_filter_indices(&[5]).unwrap_err();
    assert_eq!(err, ExpenseError::InvalidFilterIndex { index: 5, len: 2 });
    assert!(store.matched_filter_indices().is_empty());
    assert_eq!(probe.updates.get(), 3);
}

#[test]
fn test_add_then_last_element_and_empty_matches() {
    let mut store = TransactionStore::new();
    for (second, amount) in [dec!(1), dec!(2.5), dec!(999.99)].into_iter().enumerate() {
        let t = tx(amount, Category::Other, second as u32);
        store.add_transaction(t.clone()).unwrap();
        assert_eq!(store.transactions().last(), Some(&t));
        assert!(store.matched_filter_indices().is_empty());
    }
}

#[test]
fn test_invalid_transaction_leaves_list_unchanged() {
    let mut store = TransactionStore::new();
    store
        .add_transaction(tx(dec!(10), Category::Bills, 0))
        .unwrap();
    let before = store.transactions().to_vec();

    let oversized = Transaction {
        amount: dec!(5000),
        category: Category::Bills,
        timestamp: Utc::now(),
    };
    assert!(matches!(
        store.add_transaction(oversized),
        Err(ExpenseError::InvalidTransaction(_))
    ));
    assert_eq!(store.transactions(), before.as_slice());
}

#[test]
fn test_structural_changes_always_clear_matches() {
    let mut store = TransactionStore::new();
    let keep = tx(dec!(3), Category::Food, 0);
    let gone = tx(dec!(4), Category::Food, 1);
    store.add_transaction(keep.clone()).unwrap();
    store.add_transaction(gone.clone()).unwrap();

    store.set_matched_filter_indices(&[0, 1]).unwrap();
    store.remove_transaction(&gone);
    assert!(store.matched_filter_indices().is_empty());

    store.set_matched_filter_indices(&[0]).unwrap();
    store.add_transaction(gone).unwrap();
    assert!(store.matched_filter_indices().is_empty());

    store.set_matched_filter_indices(&[1]).unwrap();
    store.remove_transaction(&tx(dec!(500), Category::Entertainment, 9));
    assert!(store.matched_filter_indices().is_empty());
}

#[test]
fn test_every_mutation_notifies_every_listener_once() {
    let mut store = TransactionStore::new();
    let probes: Vec<Rc<ViewProbe>> = (0..3).map(|_| Rc::new(ViewProbe::default())).collect();
    for probe in &probes {
        assert!(store.register(probe.clone()));
    }

    let t = tx(dec!(15), Category::Entertainment, 0);
    store.add_transaction(t.clone()).unwrap();
    for probe in &probes {
        assert_eq!(probe.updates.get(), 1);
        assert_eq!(*probe.last_transactions.borrow(), vec![t.clone()]);
    }

    apply_filter(&mut store, &CategoryFilter::new(Category::Entertainment)).unwrap();
    for probe in &probes {
        assert_eq!(probe.updates.get(), 2);
        assert_eq!(*probe.last_matches.borrow(), vec![0]);
    }

    store.remove_transaction(&t);
    for probe in &probes {
        assert_eq!(probe.updates.get(), 3);
        assert!(probe.last_transactions.borrow().is_empty());
        assert!(probe.last_matches.borrow().is_empty());
    }
}

#[test]
fn test_owned_copies_are_isolated() {
    let mut store = TransactionStore::new();
    let t1 = tx(dec!(1), Category::Food, 0);
    store.add_transaction(t1.clone()).unwrap();
    store.set_matched_filter_indices(&[0]).unwrap();

    let mut snapshot = store.transactions().to_vec();
    let mut matches = store.matched_filter_indices().to_vec();
    snapshot.push(tx(dec!(2), Category::Food, 1));
    snapshot[0].amount = dec!(77);
    matches.push(42);

    assert_eq!(store.transactions(), &[t1.clone()]);
    assert_eq!(store.matched_filter_indices(), &[0]);

    // Later mutations do not reach back into an earlier snapshot
    let earlier = store.transactions().to_vec();
    store.add_transaction(tx(dec!(3), Category::Food, 2)).unwrap();
    assert_eq!(earlier, vec![t1]);
}

#[test]
fn test_setter_copies_input() {
    let mut store = TransactionStore::new();
    store.add_transaction(tx(dec!(1), Category::Food, 0)).unwrap();
    store.add_transaction(tx(dec!(2), Category::Food, 1)).unwrap();

    let mut indices = vec![1, 0];
    store.set_matched_filter_indices(&indices).unwrap();
    indices.clear();
    assert_eq!(store.matched_filter_indices(), &[1, 0]);
}
