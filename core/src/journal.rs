//! Journal payload builder — projects reconciliation results into
//! export shapes for downstream accounting ingestion. Field selection
//! only; every amount was already normalized upstream.

use crate::cash::CashVarianceRecord;
use crate::matcher::MatchOutcome;
use crate::money::resolve_amount_cents;
use crate::record::{resolve_key, string_field};
use crate::types::{Cents, Record};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct JournalExports {
    pub matched: Vec<MatchedEntry>,
    pub exceptions: Vec<ExceptionEntry>,
    pub cash: Vec<CashEntry>,
    pub chargebacks: Vec<ChargebackEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchedEntry {
    pub reference: Option<String>,
    pub settlement_amount_cents: Cents,
    pub sale_amount_cents: Cents,
    pub variance_cents: Cents,
    pub sale_id: Option<String>,
    pub settlement_id: Option<String>,
    pub settled_at: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionKind {
    Settlement,
    Sale,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExceptionEntry {
    #[serde(rename = "type")]
    pub kind: ExceptionKind,
    pub reference: Option<String>,
    pub amount_cents: Cents,
    pub occurred_at: Option<String>,
    pub record: Record,
}

#[derive(Debug, Clone, Serialize)]
pub struct CashEntry {
    pub variance_cents: Cents,
    pub expected_cents: Cents,
    pub collected_cents: Cents,
    pub machine_id: Option<String>,
    pub collected_at: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChargebackEntry {
    pub reference: Option<String>,
    pub amount_cents: Cents,
    pub status: Option<String>,
    pub opened_at: Option<String>,
    pub record: Record,
}

pub fn build_journal_exports(
    batch: &Record,
    outcome: &MatchOutcome,
    variance_records: &[CashVarianceRecord],
    chargebacks: &[Record],
) -> JournalExports {
    let batch_settled_at = string_field(batch, &["settlement_date"]);
    let batch_payment_method = string_field(batch, &["payment_method"]);

    let matched = outcome
        .matched
        .iter()
        .map(|pair| MatchedEntry {
            reference: resolve_key(&pair.transaction),
            settlement_amount_cents: pair.settlement_amount_cents,
            sale_amount_cents: pair.sale_amount_cents,
            variance_cents: pair.variance_cents,
            sale_id: string_field(&pair.sale, &["id"]),
            settlement_id: string_field(&pair.transaction, &["id"]),
            settled_at: string_field(&pair.transaction, &["settlement_date"])
                .or_else(|| batch_settled_at.clone()),
            payment_method: string_field(&pair.transaction, &["payment_method"])
                .or_else(|| string_field(&pair.sale, &["payment_method"]))
                .or_else(|| batch_payment_method.clone()),
        })
        .collect();

    let mut exceptions: Vec<ExceptionEntry> = outcome
        .unmatched_settlements
        .iter()
        .map(|transaction| ExceptionEntry {
            kind: ExceptionKind::Settlement,
            reference: resolve_key(transaction),
            amount_cents: resolve_amount_cents(transaction),
            occurred_at: string_field(transaction, &["settlement_date"])
                .or_else(|| batch_settled_at.clone()),
            record: transaction.clone(),
        })
        .collect();
    exceptions.extend(outcome.unmatched_sales.iter().map(|sale| ExceptionEntry {
        kind: ExceptionKind::Sale,
        reference: resolve_key(sale),
        amount_cents: resolve_amount_cents(sale),
        occurred_at: string_field(sale, &["sale_datetime", "created_at"]),
        record: sale.clone(),
    }));

    let cash = variance_records
        .iter()
        .map(|variance| CashEntry {
            variance_cents: variance.variance_cents,
            expected_cents: variance.expected_cents,
            collected_cents: variance.collected_cents,
            machine_id: string_field(&variance.record, &["machine_id", "device_id"]),
            collected_at: string_field(
                &variance.record,
                &["cash_collected_at", "collected_at", "created_at"],
            ),
            notes: string_field(&variance.record, &["variance_reason", "notes"]),
        })
        .collect();

    let chargebacks = chargebacks
        .iter()
        .map(|record| ChargebackEntry {
            reference: resolve_key(record),
            amount_cents: resolve_amount_cents(record),
            status: string_field(record, &["status", "outcome"]),
            opened_at: string_field(record, &["opened_at", "created_at"]),
            record: record.clone(),
        })
        .collect();

    JournalExports {
        matched,
        exceptions,
        cash,
        chargebacks,
    }
}
