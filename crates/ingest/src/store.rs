use crate::error::StoreError;
use chrono::{DateTime, Utc};
use core_types::{PriceBar, TimeInterval, TimeSeries, TimeSeriesMetadata};
use std::collections::BTreeMap;

/// The storage collaborator that receives validated bars.
///
/// Implementations must upsert on `(symbol, timestamp)`: writing the same
/// key twice keeps one record holding the latest values.
pub trait BarStore {
    fn upsert(&mut self, bar: PriceBar) -> Result<(), StoreError>;
}

/// An in-process `BarStore` keyed by `(symbol, timestamp)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBarStore {
    bars: BTreeMap<(String, DateTime<Utc>), PriceBar>,
    capacity: Option<usize>,
}

impl InMemoryBarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses new keys once `capacity` bars are held.
    /// Overwrites of existing keys are always accepted.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            bars: BTreeMap::new(),
            capacity: Some(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn get(&self, symbol: &str, timestamp: DateTime<Utc>) -> Option<&PriceBar> {
        self.bars.get(&(symbol.to_string(), timestamp))
    }

    /// All bars for `symbol`, oldest first.
    pub fn bars(&self, symbol: &str) -> Vec<PriceBar> {
        self.bars
            .iter()
            .filter(|((stored, _), _)| stored == symbol)
            .map(|(_, bar)| bar.clone())
            .collect()
    }

    /// Close prices for `symbol`, oldest first.
    pub fn closes(&self, symbol: &str) -> Vec<f64> {
        self.bars
            .iter()
            .filter(|((stored, _), _)| stored == symbol)
            .map(|(_, bar)| bar.close())
            .collect()
    }

    /// Packages the stored bars of `symbol` as a `TimeSeries`.
    pub fn series(
        &self,
        symbol: &str,
        frequency: TimeInterval,
        source: impl Into<String>,
    ) -> TimeSeries {
        let data = self.bars(symbol);
        let last_updated = data
            .last()
            .map(PriceBar::timestamp)
            .unwrap_or_default();

        TimeSeries {
            symbol: symbol.to_string(),
            data,
            metadata: TimeSeriesMetadata {
                source: source.into(),
                last_updated,
                frequency,
            },
        }
    }
}

impl BarStore for InMemoryBarStore {
    fn upsert(&mut self, bar: PriceBar) -> Result<(), StoreError> {
        let key = bar.key();
        if let Some(capacity) = self.capacity {
            if self.bars.len() >= capacity && !self.bars.contains_key(&key) {
                return Err(StoreError::CapacityExceeded(capacity));
            }
        }
        self.bars.insert(key, bar);
        Ok(())
    }
}
