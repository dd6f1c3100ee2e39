use crate::store::BarStore;
use core_types::{parse_price_bar, RawPriceBar};
use serde::{Deserialize, Serialize};

/// Outcome of validating and storing a batch of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// True iff no record in the batch produced an error.
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// Number of records that were validated and written to the store.
    pub inserted: usize,
}

/// Validates each record and upserts the valid ones into `store`.
///
/// Records are processed in order. An invalid record, or one the store
/// refuses, is reported in `errors` and skipped; the rest of the batch
/// carries on.
#[tracing::instrument(name = "ingest_batch", skip_all, fields(records = records.len()))]
pub fn ingest_batch<S>(records: &[RawPriceBar], store: &mut S) -> BatchResult
where
    S: BarStore + ?Sized,
{
    let mut errors = Vec::new();
    let mut inserted: usize = 0;

    for record in records {
        let bar = match parse_price_bar(record) {
            Ok(bar) => bar,
            Err(result) => {
                tracing::debug!(
                    symbol = %record.symbol_label(),
                    timestamp = %record.timestamp_label(),
                    violations = result.errors().len(),
                    "Rejected invalid price bar."
                );
                errors.push(format!(
                    "{} at {}: {}",
                    record.symbol_label(),
                    record.timestamp_label(),
                    result.errors().join(", ")
                ));
                continue;
            }
        };

        let symbol = bar.symbol().to_string();
        match store.upsert(bar) {
            Ok(()) => inserted += 1,
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Store refused price bar.");
                errors.push(format!("Storage error for {symbol}: {e}"));
            }
        }
    }

    tracing::info!(
        inserted,
        rejected = errors.len(),
        "Price bar batch processed."
    );

    BatchResult {
        is_valid: errors.is_empty(),
        errors,
        inserted,
    }
}
