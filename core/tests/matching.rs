//! Settlement matcher behaviour.
//!
//! 1. Key-based pairing with FIFO tie-break for duplicate keys
//! 2. Direct sale_id fallback when no key bucket hits
//! 3. Claimed sales are never matched twice
//! 4. Conservation: every input lands in exactly one output set

use serde_json::json;
use vendops_core::matcher::match_settlements;
use vendops_core::record::string_field;

// ─────────────────────────────────────────────────────────────────────────────
// Key-based pairing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn matches_by_shared_reference() {
    let transactions = vec![json!({"id": "t1", "reference": "R1", "amount_cents": 1000})];
    let sales = vec![json!({"id": "s1", "reference": "R1", "amount": 10.0})];

    let outcome = match_settlements(&transactions, &sales);
    assert_eq!(outcome.matched.len(), 1);
    assert_eq!(outcome.matched[0].settlement_amount_cents, 1000);
    assert_eq!(outcome.matched[0].sale_amount_cents, 1000);
    assert_eq!(outcome.matched[0].variance_cents, 0);
    assert!(outcome.unmatched_settlements.is_empty());
    assert!(outcome.unmatched_sales.is_empty());
}

#[test]
fn variance_is_settlement_minus_sale() {
    let transactions = vec![json!({"reference": "R1", "amount_cents": 1000})];
    let sales = vec![json!({"id": "s1", "reference": "R1", "amount": 9.5})];

    let outcome = match_settlements(&transactions, &sales);
    assert_eq!(outcome.matched[0].variance_cents, 50);
}

#[test]
fn duplicate_keys_consume_sales_in_fifo_order() {
    let transactions = vec![
        json!({"id": "t1", "reference": "DUP", "amount_cents": 100}),
        json!({"id": "t2", "reference": "DUP", "amount_cents": 200}),
    ];
    let sales = vec![
        json!({"id": "s1", "reference": "DUP", "amount_cents": 100}),
        json!({"id": "s2", "reference": "DUP", "amount_cents": 200}),
    ];

    let outcome = match_settlements(&transactions, &sales);
    assert_eq!(outcome.matched.len(), 2);
    assert_eq!(string_field(&outcome.matched[0].sale, &["id"]).unwrap(), "s1");
    assert_eq!(string_field(&outcome.matched[1].sale, &["id"]).unwrap(), "s2");
}

// ─────────────────────────────────────────────────────────────────────────────
// sale_id fallback
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn sale_id_link_claims_sale_when_keys_disagree() {
    let transactions = vec![json!({"reference": "PROC-REF", "sale_id": "s9", "amount_cents": 500})];
    let sales = vec![json!({"id": "s9", "payment_reference": "POS-REF", "amount_cents": 500})];

    let outcome = match_settlements(&transactions, &sales);
    assert_eq!(outcome.matched.len(), 1);
    assert!(outcome.unmatched_sales.is_empty());
}

#[test]
fn claimed_sale_is_never_matched_twice() {
    let transactions = vec![
        json!({"reference": "A", "sale_id": "s1", "amount_cents": 100}),
        json!({"reference": "B", "sale_id": "s1", "amount_cents": 100}),
    ];
    let sales = vec![json!({"id": "s1", "amount_cents": 100})];

    let outcome = match_settlements(&transactions, &sales);
    assert_eq!(outcome.matched.len(), 1);
    assert_eq!(outcome.unmatched_settlements.len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Unmatched sets and conservation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn keyless_sales_surface_as_unmatched() {
    let outcome = match_settlements(&[], &[json!({"amount": 5.0})]);
    assert_eq!(outcome.unmatched_sales.len(), 1);
}

#[test]
fn unmatched_sales_keep_original_list_order() {
    let sales = vec![
        json!({"id": "s1", "reference": "X1"}),
        json!({"id": "s2", "reference": "X2"}),
        json!({"id": "s3", "reference": "X3"}),
    ];
    let outcome = match_settlements(&[], &sales);
    let ids: Vec<String> = outcome
        .unmatched_sales
        .iter()
        .map(|s| string_field(s, &["id"]).unwrap())
        .collect();
    assert_eq!(ids, ["s1", "s2", "s3"]);
}

#[test]
fn every_input_lands_in_exactly_one_output_set() {
    let transactions = vec![
        json!({"reference": "R1", "amount_cents": 100}),
        json!({"reference": "GONE", "amount_cents": 200}),
        json!({"reference": "R2", "amount_cents": 300}),
    ];
    let sales = vec![
        json!({"id": "s1", "reference": "R1", "amount_cents": 100}),
        json!({"id": "s2", "reference": "R2", "amount_cents": 300}),
        json!({"id": "s3", "reference": "ORPHAN", "amount_cents": 400}),
    ];

    let outcome = match_settlements(&transactions, &sales);
    assert_eq!(
        outcome.matched.len() + outcome.unmatched_settlements.len(),
        transactions.len()
    );
    assert_eq!(
        outcome.matched.len() + outcome.unmatched_sales.len(),
        sales.len()
    );
}
