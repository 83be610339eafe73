//! Monetary normalization.
//!
//! Contract: everything crossing this boundary becomes an integer number
//! of cents. Rounding is round-half-away-from-zero via `f64::round`,
//! applied to the scaled product, so `2.005` dollars normalizes to 201
//! cents (the IEEE product is exactly 200.5). Tests pin this.

use crate::record::present;
use crate::types::{Cents, Record};
use serde_json::Value;

/// Default variance threshold: $5.00.
pub const DEFAULT_TOLERANCE_CENTS: Cents = 500;

/// Amount aliases for transaction-like and sale records. Cents-suffixed
/// fields carry integer cents; the rest are dollar-denominated.
const AMOUNT_FIELDS: &[(&str, bool)] = &[
    ("amount_cents", true),
    ("total_amount_cents", true),
    ("settlement_amount_cents", true),
    ("gross_amount_cents", true),
    ("net_amount_cents", true),
    ("amount", false),
    ("total_amount", false),
    ("gross_amount", false),
    ("net_amount", false),
    ("value", false),
];

/// Normalize a single value to cents.
///
/// - `None` / JSON null → 0
/// - finite number: rounded if already cents, else ×100 then rounded
/// - string: stripped of everything but digits, `.`, `-`, then parsed
///   as a float and scaled the same way; unparseable → 0
/// - any other JSON type → 0
pub fn to_cents(value: Option<&Value>, already_in_cents: bool) -> Cents {
    let Some(value) = value else { return 0 };
    match value {
        Value::Number(n) => n.as_f64().map_or(0, |raw| scale(raw, already_in_cents)),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            cleaned
                .parse::<f64>()
                .map_or(0, |raw| scale(raw, already_in_cents))
        }
        _ => 0,
    }
}

fn scale(raw: f64, already_in_cents: bool) -> Cents {
    if !raw.is_finite() {
        return 0;
    }
    let cents = if already_in_cents { raw } else { raw * 100.0 };
    cents.round() as Cents
}

/// Resolve a record's amount in cents via the alias table, first present
/// field wins. A bare JSON number is treated as dollars. No amount at
/// all → 0.
pub fn resolve_amount_cents(record: &Record) -> Cents {
    if record.is_number() {
        return to_cents(Some(record), false);
    }
    for (name, already_in_cents) in AMOUNT_FIELDS {
        if let Some(value) = present(record, name) {
            return to_cents(Some(value), *already_in_cents);
        }
    }
    0
}
