//! Cash variance calculator — collected vs expected for one cash
//! collection record.

use crate::money::to_cents;
use crate::record::{first_present, present};
use crate::types::{Cents, Record};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

const COLLECTED_CENT_FIELDS: &[&str] = &[
    "cash_collected_cents",
    "counted_amount_cents",
    "cash_total_cents",
];
const COLLECTED_FIELDS: &[&str] = &[
    "cash_collected_cents",
    "counted_amount_cents",
    "cash_total_cents",
    "counted_amount",
    "cash_collected",
];
const EXPECTED_CENT_FIELDS: &[&str] = &[
    "expected_cash_cents",
    "expected_amount_cents",
    "meter_amount_cents",
];
const EXPECTED_FIELDS: &[&str] = &[
    "expected_cash_cents",
    "expected_amount_cents",
    "meter_amount_cents",
    "expected_amount",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CashVariance {
    pub collected_cents: Cents,
    pub expected_cents: Cents,
    pub variance_cents: Cents,
}

/// Compute collected/expected/variance cents for one record.
///
/// The already-cents flag is keyed off the presence of ANY `*_cents`
/// sibling, even when a dollars-denominated fallback field wins the
/// probe. Kept for parity with the upstream processor feeds.
/// TODO: confirm with product whether a dollars fallback sitting next
/// to a present `*_cents` sibling should really be read as cents.
pub fn compute_cash_variance(record: Option<&Record>) -> CashVariance {
    let Some(record) = record else {
        return CashVariance::default();
    };

    let collected_in_cents = COLLECTED_CENT_FIELDS
        .iter()
        .any(|name| present(record, name).is_some());
    let collected_cents = to_cents(first_present(record, COLLECTED_FIELDS), collected_in_cents);

    let expected_in_cents = EXPECTED_CENT_FIELDS
        .iter()
        .any(|name| present(record, name).is_some());
    let mut expected_cents = to_cents(first_present(record, EXPECTED_FIELDS), expected_in_cents);
    if expected_cents == 0 {
        // Last resort: the mechanical meter reading, dollar-denominated.
        if let Some(meter) = present(record, "meter_reading") {
            expected_cents = to_cents(Some(meter), false);
        }
    }

    // An explicit numeric variance from the counting device wins over
    // the derived difference.
    let variance_cents = match present(record, "variance_cents").and_then(Value::as_f64) {
        Some(explicit) => explicit.round() as Cents,
        None => collected_cents - expected_cents,
    };

    CashVariance {
        collected_cents,
        expected_cents,
        variance_cents,
    }
}

/// A cash variance enriched for reporting: synthetic id, dollar echo of
/// the variance, tolerance flag, and the source record.
#[derive(Debug, Clone, Serialize)]
pub struct CashVarianceRecord {
    pub id: String,
    pub collected_cents: Cents,
    pub expected_cents: Cents,
    pub variance_cents: Cents,
    pub variance_dollars: f64,
    pub exceeded_tolerance: bool,
    pub record: Record,
}

pub fn build_variance_record(record: &Record, tolerance_cents: Cents) -> CashVarianceRecord {
    let variance = compute_cash_variance(Some(record));
    CashVarianceRecord {
        id: format!("cash-var-{}", Uuid::new_v4()),
        collected_cents: variance.collected_cents,
        expected_cents: variance.expected_cents,
        variance_cents: variance.variance_cents,
        variance_dollars: variance.variance_cents as f64 / 100.0,
        exceeded_tolerance: variance.variance_cents.abs() > tolerance_cents,
        record: record.clone(),
    }
}
