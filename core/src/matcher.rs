//! Settlement matcher — pairs processor settlement transactions against
//! internal sales.
//!
//! Strategy, in order:
//!   1. Shared reference: sales are bucketed by resolved key; each
//!      transaction dequeues the oldest sale in its key's bucket (FIFO
//!      tie-break for duplicate keys).
//!   2. Direct linkage: a transaction carrying `sale_id` claims the
//!      sale with that `id`, if still unclaimed.
//! A claimed sale can never be matched twice. Matched output follows
//! transaction order; unmatched sales keep original list order.

use crate::money::resolve_amount_cents;
use crate::record::{present, resolve_key, value_to_string};
use crate::types::{Cents, Record};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Serialize)]
pub struct MatchedSettlement {
    pub transaction: Record,
    pub sale: Record,
    pub settlement_amount_cents: Cents,
    pub sale_amount_cents: Cents,
    /// Signed: settlement minus sale.
    pub variance_cents: Cents,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchOutcome {
    pub matched: Vec<MatchedSettlement>,
    pub unmatched_settlements: Vec<Record>,
    pub unmatched_sales: Vec<Record>,
}

pub fn match_settlements(transactions: &[Record], sales: &[Record]) -> MatchOutcome {
    // Key → FIFO queue of sale indices. Keyless sales never enter a
    // bucket; they surface as unmatched unless claimed via sale_id.
    let mut buckets: HashMap<String, VecDeque<usize>> = HashMap::new();
    for (idx, sale) in sales.iter().enumerate() {
        if let Some(key) = resolve_key(sale) {
            buckets.entry(key).or_default().push_back(idx);
        }
    }

    let mut claimed = vec![false; sales.len()];
    let mut outcome = MatchOutcome::default();

    for transaction in transactions {
        let mut sale_idx = None;

        if let Some(key) = resolve_key(transaction) {
            if let Some(queue) = buckets.get_mut(&key) {
                while let Some(idx) = queue.pop_front() {
                    if !claimed[idx] {
                        sale_idx = Some(idx);
                        break;
                    }
                }
            }
        }

        if sale_idx.is_none() {
            if let Some(target) = present(transaction, "sale_id").and_then(value_to_string) {
                sale_idx = (0..sales.len()).find(|&idx| {
                    !claimed[idx]
                        && present(&sales[idx], "id")
                            .and_then(value_to_string)
                            .is_some_and(|id| id == target)
                });
            }
        }

        match sale_idx {
            Some(idx) => {
                claimed[idx] = true;
                let sale = &sales[idx];
                let settlement_amount_cents = resolve_amount_cents(transaction);
                let sale_amount_cents = resolve_amount_cents(sale);
                outcome.matched.push(MatchedSettlement {
                    transaction: transaction.clone(),
                    sale: sale.clone(),
                    settlement_amount_cents,
                    sale_amount_cents,
                    variance_cents: settlement_amount_cents - sale_amount_cents,
                });
            }
            None => outcome.unmatched_settlements.push(transaction.clone()),
        }
    }

    for (idx, sale) in sales.iter().enumerate() {
        if !claimed[idx] {
            outcome.unmatched_sales.push(sale.clone());
        }
    }

    outcome
}
