use crate::error::AnalyticsError;
use serde_json::Value;

/// Converts untyped JSON values into a numeric series.
///
/// Fails on the first element that is not a JSON number. Strings, booleans
/// and nulls are never coerced.
pub fn series_from_json(values: &[Value]) -> Result<Vec<f64>, AnalyticsError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .as_f64()
                .ok_or_else(|| AnalyticsError::InvalidInputType {
                    index,
                    found: kind(value),
                })
        })
        .collect()
}

/// Parses a JSON array (e.g. `[100.0, 101.5]`) into a numeric series.
pub fn parse_series(json: &str) -> Result<Vec<f64>, AnalyticsError> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    series_from_json(&values)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
