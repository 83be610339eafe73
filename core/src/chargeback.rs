//! Chargeback classifier — buckets dispute records by status vocabulary
//! and totals their amounts.

use crate::money::resolve_amount_cents;
use crate::record::string_field;
use crate::types::{Cents, Record};
use serde::Serialize;

const PENDING_STATUSES: &[&str] = &["pending", "open", "in_review", "investigating"];
const WON_STATUSES: &[&str] = &["won", "resolved", "upheld", "closed_won"];
const LOST_STATUSES: &[&str] = &["lost", "rejected", "closed_lost"];

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChargebackSummary {
    pub records: Vec<Record>,
    /// Sum over ALL records, independent of status bucket.
    pub total_amount_cents: Cents,
    pub pending_count: usize,
    pub won_count: usize,
    pub lost_count: usize,
}

/// Classify `status` (else `outcome`), lowercased, against the fixed
/// vocabularies. Records outside every vocabulary still count toward
/// `records` and `total_amount_cents`.
pub fn classify_chargebacks(records: &[Record]) -> ChargebackSummary {
    let mut summary = ChargebackSummary::default();

    for record in records {
        summary.total_amount_cents += resolve_amount_cents(record);

        let status = string_field(record, &["status", "outcome"])
            .unwrap_or_default()
            .to_lowercase();
        if PENDING_STATUSES.contains(&status.as_str()) {
            summary.pending_count += 1;
        } else if WON_STATUSES.contains(&status.as_str()) {
            summary.won_count += 1;
        } else if LOST_STATUSES.contains(&status.as_str()) {
            summary.lost_count += 1;
        }

        summary.records.push(record.clone());
    }

    summary
}
