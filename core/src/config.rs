//! Engine configuration, loadable from a JSON file by the runner.

use crate::error::ReconResult;
use crate::money::DEFAULT_TOLERANCE_CENTS;
use crate::types::Cents;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationConfig {
    /// Absolute variance (cents) below which a discrepancy is not flagged.
    #[serde(default = "default_tolerance_cents")]
    pub tolerance_cents: Cents,
    /// Window (days) for associating undated cash counts with a batch
    /// by proximity to its settlement date.
    #[serde(default = "default_cash_proximity_days")]
    pub cash_proximity_days: i64,
    #[serde(default = "default_include_chargebacks")]
    pub include_chargebacks: bool,
}

fn default_tolerance_cents() -> Cents {
    DEFAULT_TOLERANCE_CENTS
}

fn default_cash_proximity_days() -> i64 {
    7
}

fn default_include_chargebacks() -> bool {
    true
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            tolerance_cents: default_tolerance_cents(),
            cash_proximity_days: default_cash_proximity_days(),
            include_chargebacks: default_include_chargebacks(),
        }
    }
}

impl ReconciliationConfig {
    pub fn load(path: &str) -> ReconResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
