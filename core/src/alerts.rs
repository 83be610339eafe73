//! Tolerance & alert builder.
//!
//! Emission order: settlement-variance, cash-variance,
//! unmatched-settlement, unmatched-sale — each group in its input
//! order. A variance exactly at the tolerance emits nothing; unmatched
//! records always alert regardless of amount.

use crate::cash::CashVarianceRecord;
use crate::matcher::MatchedSettlement;
use crate::record::{resolve_key, string_field};
use crate::types::{Cents, Record};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertType {
    SettlementVariance,
    CashVariance,
    UnmatchedSettlement,
    UnmatchedSale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToleranceAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    pub context: Record,
}

fn alert(
    alert_type: AlertType,
    severity: AlertSeverity,
    message: String,
    context: Record,
) -> ToleranceAlert {
    ToleranceAlert {
        id: format!("alert-{}", Uuid::new_v4()),
        alert_type,
        severity,
        message,
        context,
    }
}

fn reference_of(record: &Record) -> String {
    resolve_key(record).unwrap_or_else(|| "unknown".to_string())
}

pub fn build_tolerance_alerts(
    matched: &[MatchedSettlement],
    variance_records: &[CashVarianceRecord],
    unmatched_settlements: &[Record],
    unmatched_sales: &[Record],
    tolerance_cents: Cents,
) -> Vec<ToleranceAlert> {
    let mut alerts = Vec::new();

    for pair in matched {
        if pair.variance_cents.abs() > tolerance_cents {
            alerts.push(alert(
                AlertType::SettlementVariance,
                AlertSeverity::Warning,
                format!(
                    "Settlement {} differs from sale by ${:.2}",
                    reference_of(&pair.transaction),
                    pair.variance_cents.abs() as f64 / 100.0
                ),
                json!({
                    "transaction": pair.transaction,
                    "sale": pair.sale,
                    "variance_cents": pair.variance_cents,
                }),
            ));
        }
    }

    for variance in variance_records {
        if variance.exceeded_tolerance {
            let machine = string_field(&variance.record, &["machine_id", "device_id"])
                .unwrap_or_else(|| "unknown".to_string());
            alerts.push(alert(
                AlertType::CashVariance,
                AlertSeverity::Warning,
                format!(
                    "Cash count on machine {} off by ${:.2}",
                    machine,
                    variance.variance_cents.abs() as f64 / 100.0
                ),
                json!({
                    "record": variance.record,
                    "variance_cents": variance.variance_cents,
                }),
            ));
        }
    }

    for transaction in unmatched_settlements {
        alerts.push(alert(
            AlertType::UnmatchedSettlement,
            AlertSeverity::Critical,
            format!(
                "Settlement transaction {} has no matching sale",
                reference_of(transaction)
            ),
            json!({ "transaction": transaction }),
        ));
    }

    for sale in unmatched_sales {
        alerts.push(alert(
            AlertType::UnmatchedSale,
            AlertSeverity::Critical,
            format!(
                "Sale {} has no matching settlement transaction",
                reference_of(sale)
            ),
            json!({ "sale": sale }),
        ));
    }

    alerts
}
