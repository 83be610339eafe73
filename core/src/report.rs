//! Reconciliation report — the engine's single output shape.
//!
//! Built fresh per call; inputs are never mutated and nothing here is
//! persisted by the engine itself.

use crate::alerts::ToleranceAlert;
use crate::cash::CashVarianceRecord;
use crate::chargeback::ChargebackSummary;
use crate::journal::JournalExports;
use crate::matcher::MatchedSettlement;
use crate::types::{Cents, Record};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    pub batch: Record,
    pub transactions: TransactionBreakdown,
    pub variance_records: Vec<CashVarianceRecord>,
    pub tolerance_alerts: Vec<ToleranceAlert>,
    pub chargebacks: ChargebackSummary,
    pub totals: ReportTotals,
    pub journal_exports: JournalExports,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionBreakdown {
    pub matched: Vec<MatchedSettlement>,
    pub unmatched_settlements: Vec<Record>,
    pub unmatched_sales: Vec<Record>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportTotals {
    pub matched_count: usize,
    pub matched_amount_cents: Cents,
    pub unmatched_settlement_count: usize,
    pub unmatched_settlement_amount_cents: Cents,
    pub unmatched_sale_count: usize,
    pub unmatched_sale_amount_cents: Cents,
    pub cash_variance_cents: Cents,
    /// Equals the number of tolerance alerts emitted.
    pub tolerance_breach_count: usize,
    pub chargeback_count: usize,
    pub chargeback_amount_cents: Cents,
}
