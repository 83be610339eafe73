//! Reconciliation orchestrator.
//!
//! Execution order: resolve batch → load sales → load cash counts →
//! load chargebacks → match settlements → cash variances → tolerance
//! alerts → chargeback classification → totals → journal exports.
//!
//! Failure policy: only batch resolution is fatal. Every downstream
//! collection load failure is logged and degrades to an empty
//! collection, so the report still generates with partial data. No
//! retries; callers wanting them re-invoke the whole operation.

use crate::alerts::{build_tolerance_alerts, ToleranceAlert};
use crate::cash::{build_variance_record, CashVarianceRecord};
use crate::chargeback::classify_chargebacks;
use crate::config::ReconciliationConfig;
use crate::error::{ReconError, ReconResult};
use crate::journal::build_journal_exports;
use crate::matcher::{match_settlements, MatchOutcome};
use crate::money::{resolve_amount_cents, DEFAULT_TOLERANCE_CENTS};
use crate::record::{
    first_present, parse_timestamp, present, resolve_key, string_field, value_to_string,
};
use crate::report::{ReconciliationReport, ReportTotals, TransactionBreakdown};
use crate::source::RecordSource;
use crate::types::{Cents, Record};
use serde_json::Value;
use std::collections::HashSet;

/// Batch linkage aliases on sales records.
const SALE_BATCH_FIELDS: &[&str] = &["settlement_batch_id", "batch_id", "settlement_batch"];
/// Batch linkage aliases on cash counts and chargebacks.
const BATCH_LINK_FIELDS: &[&str] = &["settlement_batch_id", "batch_id"];
/// Identity aliases on the batch record itself.
const BATCH_ID_FIELDS: &[&str] = &["id", "batch_id"];
const COLLECTED_AT_FIELDS: &[&str] = &["cash_collected_at", "collected_at", "created_at"];

/// A batch handed in directly, or an id to resolve against the source.
#[derive(Debug, Clone)]
pub enum BatchRef {
    Record(Record),
    Id(String),
}

impl From<Record> for BatchRef {
    fn from(record: Record) -> Self {
        BatchRef::Record(record)
    }
}

impl From<String> for BatchRef {
    fn from(id: String) -> Self {
        BatchRef::Id(id)
    }
}

impl From<&str> for BatchRef {
    fn from(id: &str) -> Self {
        BatchRef::Id(id.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Caller-supplied sales snapshot; a non-empty list skips loading.
    pub sales: Option<Vec<Record>>,
    /// Caller-supplied cash counts; a non-empty list skips loading.
    pub cash_counts: Option<Vec<Record>>,
    pub tolerance_cents: Cents,
    pub include_chargebacks: bool,
    pub cash_proximity_days: i64,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            sales: None,
            cash_counts: None,
            tolerance_cents: DEFAULT_TOLERANCE_CENTS,
            include_chargebacks: true,
            cash_proximity_days: 7,
        }
    }
}

impl From<&ReconciliationConfig> for ReconcileOptions {
    fn from(config: &ReconciliationConfig) -> Self {
        Self {
            tolerance_cents: config.tolerance_cents,
            include_chargebacks: config.include_chargebacks,
            cash_proximity_days: config.cash_proximity_days,
            ..Self::default()
        }
    }
}

pub struct ReconciliationEngine<S: RecordSource> {
    source: S,
}

impl<S: RecordSource> ReconciliationEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Reconcile one settlement batch against sales, cash counts, and
    /// chargebacks, producing the full report. Fails only when the
    /// batch itself cannot be resolved.
    pub fn reconcile_settlement_batch(
        &self,
        batch: impl Into<BatchRef>,
        options: &ReconcileOptions,
    ) -> ReconResult<ReconciliationReport> {
        let batch = self.resolve_batch(batch.into())?;
        let batch_ids = batch_id_values(&batch);

        let transactions: Vec<Record> =
            first_present(&batch, &["settlement_transactions", "transactions"])
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

        let sales = self.load_sales(options, &batch_ids);
        let cash_counts = self.load_cash_collections(options, &batch, &batch_ids);
        let chargebacks = if options.include_chargebacks {
            self.load_chargebacks(&batch_ids, &transactions)
        } else {
            Vec::new()
        };

        let outcome = match_settlements(&transactions, &sales);
        let variance_records: Vec<CashVarianceRecord> = cash_counts
            .iter()
            .map(|record| build_variance_record(record, options.tolerance_cents))
            .collect();
        let tolerance_alerts = build_tolerance_alerts(
            &outcome.matched,
            &variance_records,
            &outcome.unmatched_settlements,
            &outcome.unmatched_sales,
            options.tolerance_cents,
        );
        let chargeback_summary = classify_chargebacks(&chargebacks);
        let totals = compute_totals(
            &outcome,
            &variance_records,
            &tolerance_alerts,
            &chargebacks,
            chargeback_summary.total_amount_cents,
        );
        let journal_exports =
            build_journal_exports(&batch, &outcome, &variance_records, &chargebacks);

        log::debug!(
            "reconciled batch: {} matched, {} unmatched settlements, {} unmatched sales, {} cash counts, {} chargebacks, {} alerts",
            outcome.matched.len(),
            outcome.unmatched_settlements.len(),
            outcome.unmatched_sales.len(),
            variance_records.len(),
            chargebacks.len(),
            tolerance_alerts.len()
        );

        Ok(ReconciliationReport {
            batch,
            transactions: TransactionBreakdown {
                matched: outcome.matched,
                unmatched_settlements: outcome.unmatched_settlements,
                unmatched_sales: outcome.unmatched_sales,
            },
            variance_records,
            tolerance_alerts,
            chargebacks: chargeback_summary,
            totals,
            journal_exports,
        })
    }

    // ── Batch resolution ───────────────────────────────────────

    fn resolve_batch(&self, batch: BatchRef) -> ReconResult<Record> {
        let id = match batch {
            BatchRef::Record(record) => return Ok(record),
            BatchRef::Id(id) => id,
        };

        match self.source.retrieve_settlement_batch(&id) {
            Ok(Some(record)) => return Ok(record),
            Ok(None) => {}
            Err(err) => log::warn!("point lookup failed for batch '{id}', list-scanning: {err}"),
        }

        let batches = match self.source.list_settlement_batches() {
            Ok(batches) => batches,
            Err(err) => {
                log::warn!("settlement batch list-scan failed: {err}");
                Vec::new()
            }
        };
        batches
            .into_iter()
            .find(|candidate| {
                BATCH_ID_FIELDS
                    .iter()
                    .any(|field| field_equals(candidate, field, &id))
            })
            .ok_or(ReconError::BatchUnresolved { id })
    }

    // ── Collection loads (degrade to empty on failure) ─────────

    fn load_sales(&self, options: &ReconcileOptions, batch_ids: &[String]) -> Vec<Record> {
        if let Some(sales) = non_empty(&options.sales) {
            return sales;
        }
        match self.source.list_sales() {
            Ok(all) => all
                .into_iter()
                .filter(|sale| linked_to_batch(sale, SALE_BATCH_FIELDS, batch_ids))
                .collect(),
            Err(err) => {
                log::warn!("sales load failed, reconciling without sales: {err}");
                Vec::new()
            }
        }
    }

    fn load_cash_collections(
        &self,
        options: &ReconcileOptions,
        batch: &Record,
        batch_ids: &[String],
    ) -> Vec<Record> {
        if let Some(counts) = non_empty(&options.cash_counts) {
            return counts;
        }
        let all = match self.source.list_cash_collections() {
            Ok(all) => all,
            Err(err) => {
                log::warn!("cash collection load failed, reconciling without cash: {err}");
                return Vec::new();
            }
        };

        let settlement_date =
            string_field(batch, &["settlement_date"]).and_then(|raw| parse_timestamp(&raw));

        all.into_iter()
            .filter(|record| {
                // Explicit linkage wins when any linkage field exists.
                if BATCH_LINK_FIELDS
                    .iter()
                    .any(|field| present(record, field).is_some())
                {
                    return linked_to_batch(record, BATCH_LINK_FIELDS, batch_ids);
                }
                let Some(settled) = settlement_date else {
                    return false;
                };
                string_field(record, COLLECTED_AT_FIELDS)
                    .and_then(|raw| parse_timestamp(&raw))
                    .is_some_and(|collected| {
                        (collected - settled).num_days().abs() <= options.cash_proximity_days
                    })
            })
            .collect()
    }

    fn load_chargebacks(&self, batch_ids: &[String], transactions: &[Record]) -> Vec<Record> {
        let all = match self.source.list_chargebacks() {
            Ok(all) => all,
            Err(err) => {
                log::warn!("chargeback load failed, reconciling without chargebacks: {err}");
                return Vec::new();
            }
        };
        let transaction_keys: HashSet<String> =
            transactions.iter().filter_map(resolve_key).collect();

        all.into_iter()
            .filter(|record| {
                linked_to_batch(record, BATCH_LINK_FIELDS, batch_ids)
                    || resolve_key(record).is_some_and(|key| transaction_keys.contains(&key))
            })
            .collect()
    }
}

// ── Helpers ────────────────────────────────────────────────────

fn non_empty(snapshot: &Option<Vec<Record>>) -> Option<Vec<Record>> {
    snapshot.as_ref().filter(|list| !list.is_empty()).cloned()
}

fn batch_id_values(batch: &Record) -> Vec<String> {
    BATCH_ID_FIELDS
        .iter()
        .filter_map(|field| present(batch, field).and_then(value_to_string))
        .collect()
}

fn field_equals(record: &Record, field: &str, target: &str) -> bool {
    present(record, field)
        .and_then(value_to_string)
        .is_some_and(|value| value == target)
}

fn linked_to_batch(record: &Record, fields: &[&str], batch_ids: &[String]) -> bool {
    fields.iter().any(|field| {
        present(record, field)
            .and_then(value_to_string)
            .is_some_and(|value| batch_ids.iter().any(|id| *id == value))
    })
}

fn compute_totals(
    outcome: &MatchOutcome,
    variance_records: &[CashVarianceRecord],
    tolerance_alerts: &[ToleranceAlert],
    chargebacks: &[Record],
    chargeback_amount_cents: Cents,
) -> ReportTotals {
    ReportTotals {
        matched_count: outcome.matched.len(),
        matched_amount_cents: outcome
            .matched
            .iter()
            .map(|pair| pair.settlement_amount_cents)
            .sum(),
        unmatched_settlement_count: outcome.unmatched_settlements.len(),
        unmatched_settlement_amount_cents: outcome
            .unmatched_settlements
            .iter()
            .map(resolve_amount_cents)
            .sum(),
        unmatched_sale_count: outcome.unmatched_sales.len(),
        unmatched_sale_amount_cents: outcome
            .unmatched_sales
            .iter()
            .map(resolve_amount_cents)
            .sum(),
        cash_variance_cents: variance_records
            .iter()
            .map(|record| record.variance_cents)
            .sum(),
        tolerance_breach_count: tolerance_alerts.len(),
        chargeback_count: chargebacks.len(),
        chargeback_amount_cents,
    }
}
