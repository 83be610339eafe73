//! vendops-core — settlement reconciliation engine for vending
//! operations.
//!
//! Matches payment-processor settlement transactions against internal
//! sales, computes cash-count variances, classifies chargebacks, flags
//! tolerance breaches, and projects journal-export payloads for
//! downstream accounting.
//!
//! Upstream records are loosely typed; the engine probes aliased fields
//! through explicit ordered tables and normalizes every amount to
//! integer cents before any arithmetic.

pub mod alerts;
pub mod cash;
pub mod chargeback;
pub mod config;
pub mod engine;
pub mod error;
pub mod journal;
pub mod matcher;
pub mod money;
pub mod record;
pub mod report;
pub mod source;
pub mod store;
pub mod types;

pub use engine::{BatchRef, ReconcileOptions, ReconciliationEngine};
pub use error::{ReconError, ReconResult};
pub use report::ReconciliationReport;
