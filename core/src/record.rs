//! Field probing over loosely-typed records.
//!
//! RULE: every aliased field name lives in an explicit ordered table,
//! evaluated front to back, first present (non-null) entry wins. No
//! reflection, no dynamic property traps — a plain data-driven lookup.

use crate::types::Record;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Identifier aliases for transaction-like records, most specific first.
pub const KEY_FIELDS: &[&str] = &[
    "settlement_transaction_id",
    "transaction_id",
    "provider_transaction_id",
    "payment_reference",
    "provider_reference",
    "reference",
    "id",
];

/// A field counts as present when it exists and is not JSON null.
pub fn present<'a>(record: &'a Record, name: &str) -> Option<&'a Value> {
    match record.get(name) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// First present field among `names`, in table order.
pub fn first_present<'a>(record: &'a Record, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| present(record, name))
}

/// Identifiers and timestamps arrive as strings or numbers depending on
/// the source; both collapse to a string. Empty strings are treated as
/// absent.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First present field among `names`, collapsed to a string.
pub fn string_field(record: &Record, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| present(record, name).and_then(value_to_string))
}

/// Canonical matching key for a transaction-like record.
///
/// Returns the first truthy identifier field (non-empty string or
/// non-zero number). `None` when nothing resolves — callers fall back
/// to direct `sale_id` linkage or report the record unmatched.
pub fn resolve_key(record: &Record) -> Option<String> {
    for name in KEY_FIELDS {
        match present(record, name) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => {
                if n.as_f64().is_some_and(|f| f != 0.0) {
                    return Some(n.to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse an upstream timestamp. Sources emit RFC 3339, bare
/// date-times, or bare dates (midnight-anchored). Unparseable → `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
