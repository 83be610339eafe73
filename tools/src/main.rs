//! recon-runner: headless settlement reconciliation runner.
//!
//! Usage:
//!   recon-runner --data fixtures.json --batch batch-2026-08-01
//!   recon-runner --data fixtures.json --batch b1 --db run.db --config recon.json --pretty

use anyhow::{Context, Result};
use vendops_core::{
    config::ReconciliationConfig,
    engine::{ReconcileOptions, ReconciliationEngine},
    store::ReconStore,
    ReconciliationReport,
};
use std::env;

/// Fixture file shape: one array per upstream collection, all optional.
#[derive(serde::Deserialize, Default)]
struct FixtureFile {
    #[serde(default)]
    settlement_batches: Vec<serde_json::Value>,
    #[serde(default)]
    sales: Vec<serde_json::Value>,
    #[serde(default)]
    cash_collections: Vec<serde_json::Value>,
    #[serde(default)]
    chargebacks: Vec<serde_json::Value>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data = flag(&args, "--data").context("--data <fixtures.json> is required")?;
    let batch_id = flag(&args, "--batch").context("--batch <id> is required")?;
    let db = flag(&args, "--db").unwrap_or(":memory:");
    let pretty = args.iter().any(|a| a == "--pretty");

    let config = match flag(&args, "--config") {
        Some(path) => ReconciliationConfig::load(path)
            .with_context(|| format!("loading config from {path}"))?,
        None => ReconciliationConfig::default(),
    };

    let store = ReconStore::open(db)?;
    store.migrate()?;

    let text = std::fs::read_to_string(data).with_context(|| format!("reading {data}"))?;
    let fixtures: FixtureFile = serde_json::from_str(&text)?;
    log::info!(
        "loaded {} batches, {} sales, {} cash collections, {} chargebacks",
        fixtures.settlement_batches.len(),
        fixtures.sales.len(),
        fixtures.cash_collections.len(),
        fixtures.chargebacks.len()
    );

    for record in &fixtures.settlement_batches {
        store.insert_settlement_batch(record)?;
    }
    for record in &fixtures.sales {
        store.insert_sale(record)?;
    }
    for record in &fixtures.cash_collections {
        store.insert_cash_collection(record)?;
    }
    for record in &fixtures.chargebacks {
        store.insert_chargeback(record)?;
    }

    let engine = ReconciliationEngine::new(store);
    let options = ReconcileOptions::from(&config);
    let report = engine.reconcile_settlement_batch(batch_id, &options)?;

    print_summary(&report);
    if pretty {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn print_summary(report: &ReconciliationReport) {
    let totals = &report.totals;
    eprintln!("Reconciliation summary");
    eprintln!("  matched:               {:>5}  (${:.2})", totals.matched_count, totals.matched_amount_cents as f64 / 100.0);
    eprintln!("  unmatched settlements: {:>5}  (${:.2})", totals.unmatched_settlement_count, totals.unmatched_settlement_amount_cents as f64 / 100.0);
    eprintln!("  unmatched sales:       {:>5}  (${:.2})", totals.unmatched_sale_count, totals.unmatched_sale_amount_cents as f64 / 100.0);
    eprintln!("  cash variance:         ${:.2}", totals.cash_variance_cents as f64 / 100.0);
    eprintln!("  tolerance breaches:    {:>5}", totals.tolerance_breach_count);
    eprintln!("  chargebacks:           {:>5}  (${:.2})", totals.chargeback_count, totals.chargeback_amount_cents as f64 / 100.0);
}
