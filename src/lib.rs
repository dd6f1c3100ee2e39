//! # Quantlab
//!
//! The analytics core of a market-data platform: OHLCV records are validated
//! before they reach storage, and stored price series are turned into risk
//! and performance metrics.
//!
//! This crate is a facade over the workspace:
//!
//! - [`core_types`]: raw and validated price bars, the per-record validator.
//! - [`ingest`]: batch validation and the storage seam.
//! - [`analytics`]: return series, statistics and performance reports.
//! - [`configuration`]: settings loading and tracing setup.

use analytics::{AnalyticsEngine, PerformanceReport};
use anyhow::Context;
use core_types::RawPriceBar;
use ingest::{ingest_batch, BatchResult, InMemoryBarStore};
use serde_json::Value;

pub use analytics;
pub use configuration;
pub use core_types;
pub use ingest;

/// Outcome of ingesting a batch and analysing one of its symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub batch: BatchResult,
    pub performance: PerformanceReport,
}

/// Parses a JSON array of loosely-typed price bar records.
///
/// Only the outer array is required to be well formed. An element that is
/// not a JSON object becomes an empty `RawPriceBar`, so the validator reports
/// it with every field missing while its neighbours are still ingested.
/// Numbers outside the `f64` range fail the whole payload, since the JSON
/// reader rejects them before any element exists.
pub fn parse_records(json: &str) -> anyhow::Result<Vec<RawPriceBar>> {
    let values: Vec<Value> =
        serde_json::from_str(json).context("price bar payload is not a JSON array")?;

    Ok(values
        .into_iter()
        .enumerate()
        .map(|(index, value)| record_from_value(index, value))
        .collect())
}

fn record_from_value(index: usize, value: Value) -> RawPriceBar {
    if !value.is_object() {
        tracing::warn!(index, kind = json_kind(&value), "Price bar record is not an object.");
        return RawPriceBar::default();
    }
    // Every field of a raw record accepts any JSON value, so an object
    // always converts.
    serde_json::from_value(value).unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Ingests `records` into `store`, then analyses every stored close of `symbol`.
pub fn ingest_and_report(
    records: &[RawPriceBar],
    store: &mut InMemoryBarStore,
    symbol: &str,
    engine: &AnalyticsEngine,
) -> anyhow::Result<IngestReport> {
    let batch = ingest_batch(records, store);
    let closes = store.closes(symbol);
    let performance = engine
        .calculate(&closes, None)
        .with_context(|| format!("failed to analyse stored closes for {symbol}"))?;

    tracing::info!(
        symbol,
        inserted = batch.inserted,
        observations = performance.observations,
        "Ingested batch and computed performance report."
    );

    Ok(IngestReport { batch, performance })
}
