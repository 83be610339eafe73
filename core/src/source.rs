//! Data-access boundary.
//!
//! RULE: the engine reads upstream collections only through this trait.
//! It never assumes how records are stored, queried, or scoped — that
//! belongs to the implementation (SQLite store, hosted backend client,
//! in-memory fixture).

use crate::error::ReconResult;
use crate::record::string_field;
use crate::types::Record;

pub trait RecordSource {
    fn list_settlement_batches(&self) -> ReconResult<Vec<Record>>;

    /// Point lookup by id. Implementations without one may return
    /// `Ok(None)`; the orchestrator falls back to a list-scan.
    fn retrieve_settlement_batch(&self, id: &str) -> ReconResult<Option<Record>>;

    fn list_sales(&self) -> ReconResult<Vec<Record>>;
    fn list_cash_collections(&self) -> ReconResult<Vec<Record>>;
    fn list_chargebacks(&self) -> ReconResult<Vec<Record>>;
}

/// In-memory snapshot source — backs tests and callers that already
/// hold the collections.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub settlement_batches: Vec<Record>,
    pub sales: Vec<Record>,
    pub cash_collections: Vec<Record>,
    pub chargebacks: Vec<Record>,
}

impl RecordSource for StaticSource {
    fn list_settlement_batches(&self) -> ReconResult<Vec<Record>> {
        Ok(self.settlement_batches.clone())
    }

    fn retrieve_settlement_batch(&self, id: &str) -> ReconResult<Option<Record>> {
        Ok(self
            .settlement_batches
            .iter()
            .find(|batch| {
                string_field(batch, &["id", "batch_id"]).as_deref() == Some(id)
            })
            .cloned())
    }

    fn list_sales(&self) -> ReconResult<Vec<Record>> {
        Ok(self.sales.clone())
    }

    fn list_cash_collections(&self) -> ReconResult<Vec<Record>> {
        Ok(self.cash_collections.clone())
    }

    fn list_chargebacks(&self) -> ReconResult<Vec<Record>> {
        Ok(self.chargebacks.clone())
    }
}
