use crate::enums::TimeInterval;
use crate::error::CoreError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single field of a raw record as it arrived from an upstream source.
///
/// Numbers and strings are kept apart so that a price sent as `"100.0"` is
/// reported as invalid rather than coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
    Other(Value),
}

impl RawField {
    /// The numeric payload, if this field is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawField::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// The string payload, if this field is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawField::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawField::Number(value) => write!(f, "{value}"),
            RawField::Text(text) => f.write_str(text),
            RawField::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

impl From<String> for RawField {
    fn from(value: String) -> Self {
        RawField::Text(value)
    }
}

/// An OHLCV record that has not been validated yet.
///
/// Every field is optional and loosely typed. The only way to turn a
/// `RawPriceBar` into a [`PriceBar`] is through the validator
/// (`PriceBar::try_from` or [`crate::parse_price_bar`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPriceBar {
    pub symbol: Option<RawField>,
    pub timestamp: Option<RawField>,
    pub open: Option<RawField>,
    pub high: Option<RawField>,
    pub low: Option<RawField>,
    pub close: Option<RawField>,
    pub volume: Option<RawField>,
    pub adjusted_close: Option<RawField>,
}

impl RawPriceBar {
    /// Builds a raw record from already-typed values, e.g. when an adapter
    /// has parsed an upstream payload itself.
    pub fn new(
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            symbol: Some(RawField::Text(symbol.into())),
            timestamp: Some(RawField::Text(
                timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )),
            open: Some(open.into()),
            high: Some(high.into()),
            low: Some(low.into()),
            close: Some(close.into()),
            volume: Some(volume.into()),
            adjusted_close: None,
        }
    }

    pub fn with_adjusted_close(mut self, adjusted_close: f64) -> Self {
        self.adjusted_close = Some(adjusted_close.into());
        self
    }

    /// The symbol as it should appear in error reports.
    pub fn symbol_label(&self) -> String {
        label(&self.symbol)
    }

    /// The timestamp as it should appear in error reports.
    pub fn timestamp_label(&self) -> String {
        label(&self.timestamp)
    }
}

fn label(field: &Option<RawField>) -> String {
    field
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "<missing>".to_string())
}

/// A validated OHLCV bar.
///
/// Fields are private: a `PriceBar` can only be obtained from the validator,
/// and once obtained it is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPriceBar")]
pub struct PriceBar {
    pub(crate) symbol: String,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) open: f64,
    pub(crate) high: f64,
    pub(crate) low: f64,
    pub(crate) close: f64,
    pub(crate) volume: f64,
    pub(crate) adjusted_close: Option<f64>,
}

impl PriceBar {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn adjusted_close(&self) -> Option<f64> {
        self.adjusted_close
    }

    /// The identity of a bar in storage.
    pub fn key(&self) -> (String, DateTime<Utc>) {
        (self.symbol.clone(), self.timestamp)
    }
}

impl TryFrom<RawPriceBar> for PriceBar {
    type Error = ValidationResult;

    fn try_from(raw: RawPriceBar) -> Result<Self, Self::Error> {
        crate::validate::parse_price_bar(&raw)
    }
}

/// The outcome of validating one record.
///
/// `is_valid` holds exactly when `errors` is empty. Both are derived from
/// the error list, on construction and on deserialization alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ValidationWire")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
}

#[derive(Deserialize)]
struct ValidationWire {
    #[serde(default)]
    errors: Vec<String>,
}

impl From<ValidationWire> for ValidationResult {
    fn from(wire: ValidationWire) -> Self {
        Self::from_errors(wire.errors)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::from_errors(Vec::new())
    }
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Violation messages in check order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            f.write_str("valid")
        } else {
            f.write_str(&self.errors.join(", "))
        }
    }
}

impl std::error::Error for ValidationResult {}

/// Provenance of a bar series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesMetadata {
    /// Where the data came from (e.g. "yahoo", "alpha_vantage").
    pub source: String,
    pub last_updated: DateTime<Utc>,
    pub frequency: TimeInterval,
}

/// A chronologically ordered run of bars for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub symbol: String,
    pub data: Vec<PriceBar>,
    pub metadata: TimeSeriesMetadata,
}

impl TimeSeries {
    /// Creates a series, ordering the bars by timestamp.
    ///
    /// Every bar must belong to `symbol`.
    pub fn new(
        symbol: impl Into<String>,
        mut data: Vec<PriceBar>,
        metadata: TimeSeriesMetadata,
    ) -> Result<Self, CoreError> {
        let symbol = symbol.into();
        if let Some(stray) = data.iter().find(|bar| bar.symbol != symbol) {
            return Err(CoreError::InvalidInput(
                "data".to_string(),
                format!("bar for '{}' in series for '{}'", stray.symbol, symbol),
            ));
        }
        data.sort_by_key(|bar| bar.timestamp);

        Ok(Self {
            symbol,
            data,
            metadata,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Close prices in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.data.iter().map(PriceBar::close).collect()
    }

    /// Adjusted closes in chronological order, falling back to the close
    /// where no adjustment was reported.
    pub fn adjusted_closes(&self) -> Vec<f64> {
        self.data
            .iter()
            .map(|bar| bar.adjusted_close.unwrap_or(bar.close))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    fn bar(symbol: &str, day: u32, close: f64) -> PriceBar {
        PriceBar::try_from(RawPriceBar::new(symbol, ts(day), close, close, close, close, 10.0))
            .expect("valid bar")
    }

    #[test]
    fn raw_record_keeps_wrong_kinds() {
        let raw: RawPriceBar = serde_json::from_str(
            r#"{"symbol": 42, "open": "100.5", "high": true, "close": null}"#,
        )
        .unwrap();
        assert_eq!(raw.symbol, Some(RawField::Number(42.0)));
        assert_eq!(raw.open, Some(RawField::Text("100.5".to_string())));
        assert_eq!(raw.high, Some(RawField::Other(Value::Bool(true))));
        assert_eq!(raw.close, None);
        assert_eq!(raw.low, None);
    }

    #[test]
    fn labels_fall_back_for_missing_fields() {
        let raw = RawPriceBar::default();
        assert_eq!(raw.symbol_label(), "<missing>");
        assert_eq!(raw.timestamp_label(), "<missing>");
    }

    #[test]
    fn deserializing_a_price_bar_goes_through_validation() {
        let ok: PriceBar = serde_json::from_str(
            r#"{"symbol":"AAPL","timestamp":"2024-01-02T00:00:00Z","open":10,"high":12,"low":9,"close":11,"volume":100,"adjustedClose":10.9}"#,
        )
        .expect("valid");
        assert_eq!(ok.adjusted_close(), Some(10.9));

        let err = serde_json::from_str::<PriceBar>(
            r#"{"symbol":"AAPL","timestamp":"2024-01-02T00:00:00Z","open":10,"high":8,"low":9,"close":11,"volume":100}"#,
        )
        .expect_err("high below low");
        assert!(err.to_string().contains("High price cannot be less than low price"));
    }

    #[test]
    fn price_bar_serializes_camel_case_and_round_trips() {
        let original = PriceBar::try_from(
            RawPriceBar::new("MSFT", ts(3), 10.0, 11.0, 9.0, 10.5, 0.0).with_adjusted_close(10.4),
        )
        .unwrap();
        let json = serde_json::to_value(&original).unwrap();
        assert_eq!(json["adjustedClose"], serde_json::json!(10.4));
        let back: PriceBar = serde_json::from_value(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn time_series_orders_bars_and_extracts_closes() {
        let metadata = TimeSeriesMetadata {
            source: "api".to_string(),
            last_updated: ts(10),
            frequency: TimeInterval::OneDay,
        };
        let series = TimeSeries::new(
            "AAPL",
            vec![bar("AAPL", 3, 12.0), bar("AAPL", 1, 10.0), bar("AAPL", 2, 11.0)],
            metadata,
        )
        .unwrap();
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        assert_eq!(series.adjusted_closes(), vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn time_series_rejects_foreign_bars() {
        let metadata = TimeSeriesMetadata {
            source: "api".to_string(),
            last_updated: ts(10),
            frequency: TimeInterval::OneDay,
        };
        let err = TimeSeries::new("AAPL", vec![bar("MSFT", 1, 10.0)], metadata).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "data"));
    }

    #[test]
    fn validation_result_validity_follows_its_errors() {
        assert!(ValidationResult::default().is_valid());
        assert!(!ValidationResult::from_errors(vec!["bad".to_string()]).is_valid());

        let forged: ValidationResult =
            serde_json::from_str(r#"{"isValid": true, "errors": ["Symbol is required"]}"#).unwrap();
        assert!(!forged.is_valid());
        assert_eq!(forged.errors(), ["Symbol is required"]);

        let json = serde_json::to_value(&forged).unwrap();
        assert_eq!(json["isValid"], serde_json::json!(false));
    }
}
