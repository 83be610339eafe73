//! SQLite store behaviour.
//!
//! 1. Migration is idempotent
//! 2. Round-trips preserve record bodies and insertion order
//! 3. Re-inserting an id replaces the row
//! 4. The store backs the engine end-to-end as a RecordSource

use serde_json::json;
use vendops_core::engine::{ReconcileOptions, ReconciliationEngine};
use vendops_core::store::ReconStore;

fn open_store() -> ReconStore {
    let store = ReconStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
}

#[test]
fn migrate_twice_is_harmless() {
    let store = open_store();
    store.migrate().unwrap();
}

#[test]
fn batch_round_trip_by_id() {
    let store = open_store();
    let batch = json!({"id": "b1", "settlement_date": "2026-08-01"});
    store.insert_settlement_batch(&batch).unwrap();

    let found = store.get_settlement_batch("b1").unwrap();
    assert_eq!(found, Some(batch));
    assert_eq!(store.get_settlement_batch("nope").unwrap(), None);
}

#[test]
fn batches_key_on_batch_id_when_id_is_absent() {
    let store = open_store();
    store
        .insert_settlement_batch(&json!({"batch_id": "B7"}))
        .unwrap();
    assert!(store.get_settlement_batch("B7").unwrap().is_some());
}

#[test]
fn lists_preserve_insertion_order() {
    use vendops_core::source::RecordSource;

    let store = open_store();
    store.insert_sale(&json!({"id": "s1", "amount": 1.0})).unwrap();
    store.insert_sale(&json!({"id": "s2", "amount": 2.0})).unwrap();

    let sales = store.list_sales().unwrap();
    assert_eq!(sales.len(), 2);
    assert_eq!(sales[0]["id"], "s1");
    assert_eq!(sales[1]["id"], "s2");
}

#[test]
fn reinsert_replaces_by_id() {
    use vendops_core::source::RecordSource;

    let store = open_store();
    store.insert_sale(&json!({"id": "s1", "amount": 1.0})).unwrap();
    store.insert_sale(&json!({"id": "s1", "amount": 9.0})).unwrap();

    let sales = store.list_sales().unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0]["amount"], 9.0);
}

#[test]
fn engine_reconciles_over_the_store() {
    let store = open_store();
    store
        .insert_settlement_batch(&json!({
            "id": "b1",
            "settlement_date": "2026-08-01",
            "settlement_transactions": [
                {"id": "t1", "reference": "R1", "amount_cents": 1000},
                {"id": "t2", "reference": "R2", "amount_cents": 2000},
            ],
        }))
        .unwrap();
    store
        .insert_sale(&json!({"id": "s1", "reference": "R1", "amount": 10.0, "batch_id": "b1"}))
        .unwrap();
    store
        .insert_cash_collection(&json!({
            "id": "c1",
            "cash_collected_cents": 4800,
            "expected_cash_cents": 5000,
            "cash_collected_at": "2026-08-02",
        }))
        .unwrap();
    store
        .insert_chargeback(&json!({"id": "cb1", "batch_id": "b1", "status": "open", "amount": 5.0}))
        .unwrap();

    let engine = ReconciliationEngine::new(store);
    let report = engine
        .reconcile_settlement_batch("b1", &ReconcileOptions::default())
        .unwrap();

    assert_eq!(report.totals.matched_count, 1);
    assert_eq!(report.totals.unmatched_settlement_count, 1);
    assert_eq!(report.totals.unmatched_settlement_amount_cents, 2000);
    assert_eq!(report.totals.cash_variance_cents, -200);
    assert_eq!(report.chargebacks.pending_count, 1);
    assert_eq!(report.totals.chargeback_amount_cents, 500);
    // One critical alert for the unmatched settlement, nothing else.
    assert_eq!(report.totals.tolerance_breach_count, 1);
}
