//! Shared primitive types used across the engine.

/// A monetary amount as an integer number of cents.
/// Nothing past the normalization boundary is allowed to hold
/// floating-point currency.
pub type Cents = i64;

/// A loosely-typed record from an upstream system (processor feed,
/// sales ledger, cash count, chargeback report). Field presence and
/// naming vary by source; the engine probes rather than deserializes.
pub type Record = serde_json::Value;
