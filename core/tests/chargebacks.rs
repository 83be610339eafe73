//! Chargeback classifier behaviour.
//!
//! 1. Status vocabulary bucketing (case-insensitive, outcome fallback)
//! 2. Out-of-vocabulary records still count toward records and totals

use serde_json::json;
use vendops_core::chargeback::classify_chargebacks;
use vendops_core::money::resolve_amount_cents;

#[test]
fn statuses_bucket_by_vocabulary() {
    let records = vec![
        json!({"status": "pending", "amount": 1.0}),
        json!({"status": "in_review", "amount": 1.0}),
        json!({"status": "won", "amount": 1.0}),
        json!({"status": "rejected", "amount": 1.0}),
    ];
    let summary = classify_chargebacks(&records);
    assert_eq!(summary.pending_count, 2);
    assert_eq!(summary.won_count, 1);
    assert_eq!(summary.lost_count, 1);
}

#[test]
fn classification_is_case_insensitive() {
    let records = vec![json!({"status": "Closed_Won", "amount": 25.0})];
    let summary = classify_chargebacks(&records);
    assert_eq!(summary.won_count, 1);
    assert_eq!(summary.total_amount_cents, 2500);
}

#[test]
fn outcome_backstops_missing_status() {
    let summary = classify_chargebacks(&[json!({"outcome": "lost", "amount_cents": 900})]);
    assert_eq!(summary.lost_count, 1);
}

#[test]
fn unknown_statuses_count_in_no_bucket() {
    let records = vec![json!({"status": "weird", "amount_cents": 700})];
    let summary = classify_chargebacks(&records);
    assert_eq!(summary.pending_count + summary.won_count + summary.lost_count, 0);
    assert_eq!(summary.records.len(), 1);
    assert_eq!(summary.total_amount_cents, 700);
}

#[test]
fn total_is_independent_of_status_buckets() {
    let records = vec![
        json!({"status": "pending", "amount_cents": 100}),
        json!({"status": "mystery", "amount": 2.0}),
        json!({"status": "lost", "amount_cents": 300}),
    ];
    let summary = classify_chargebacks(&records);
    let expected: i64 = records.iter().map(resolve_amount_cents).sum();
    assert_eq!(summary.total_amount_cents, expected);
    assert_eq!(summary.total_amount_cents, 600);
}
