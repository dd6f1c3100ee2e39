//! Structural validation of OHLCV records.
//!
//! Every check runs independently and every failure is reported, always in
//! the same order, so that two runs over the same record produce identical
//! messages.

use crate::structs::{PriceBar, RawField, RawPriceBar, ValidationResult};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Violation messages, in check order.
pub mod messages {
    pub const SYMBOL_REQUIRED: &str = "Symbol is required";
    pub const TIMESTAMP_REQUIRED: &str = "Valid timestamp is required";
    pub const OPEN_NOT_POSITIVE: &str = "Open price must be positive";
    pub const HIGH_NOT_POSITIVE: &str = "High price must be positive";
    pub const LOW_NOT_POSITIVE: &str = "Low price must be positive";
    pub const CLOSE_NOT_POSITIVE: &str = "Close price must be positive";
    pub const VOLUME_NEGATIVE: &str = "Volume cannot be negative";
    pub const HIGH_BELOW_LOW: &str = "High price cannot be less than low price";
    pub const HIGH_BELOW_OPEN_CLOSE: &str = "High price must be >= open and close prices";
    pub const LOW_ABOVE_OPEN_CLOSE: &str = "Low price must be <= open and close prices";
    pub const ADJUSTED_CLOSE_NOT_POSITIVE: &str = "Adjusted close price must be positive";
}

use messages::*;

/// Checks one record and reports every violation.
pub fn validate_price_bar(raw: &RawPriceBar) -> ValidationResult {
    match parse_price_bar(raw) {
        Ok(_) => ValidationResult::from_errors(Vec::new()),
        Err(result) => result,
    }
}

/// Validates a record and, if it passes, returns the immutable [`PriceBar`].
pub fn parse_price_bar(raw: &RawPriceBar) -> Result<PriceBar, ValidationResult> {
    let mut errors = Vec::new();

    let symbol = raw
        .symbol
        .as_ref()
        .and_then(RawField::as_text)
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty());
    if symbol.is_none() {
        errors.push(SYMBOL_REQUIRED.to_string());
    }

    let timestamp = raw.timestamp.as_ref().and_then(parse_timestamp);
    if timestamp.is_none() {
        errors.push(TIMESTAMP_REQUIRED.to_string());
    }

    let open = positive(&raw.open);
    if open.is_none() {
        errors.push(OPEN_NOT_POSITIVE.to_string());
    }
    let high = positive(&raw.high);
    if high.is_none() {
        errors.push(HIGH_NOT_POSITIVE.to_string());
    }
    let low = positive(&raw.low);
    if low.is_none() {
        errors.push(LOW_NOT_POSITIVE.to_string());
    }
    let close = positive(&raw.close);
    if close.is_none() {
        errors.push(CLOSE_NOT_POSITIVE.to_string());
    }

    let volume = finite(&raw.volume).filter(|volume| *volume >= 0.0);
    if volume.is_none() {
        errors.push(VOLUME_NEGATIVE.to_string());
    }

    // Relations compare whatever numbers are present, even ones that already
    // failed the sign checks above.
    let (o, h, l, c) = (
        finite(&raw.open),
        finite(&raw.high),
        finite(&raw.low),
        finite(&raw.close),
    );
    if let (Some(h), Some(l)) = (h, l) {
        if h < l {
            errors.push(HIGH_BELOW_LOW.to_string());
        }
    }
    if let Some(h) = h {
        if o.is_some_and(|o| h < o) || c.is_some_and(|c| h < c) {
            errors.push(HIGH_BELOW_OPEN_CLOSE.to_string());
        }
    }
    if let Some(l) = l {
        if o.is_some_and(|o| l > o) || c.is_some_and(|c| l > c) {
            errors.push(LOW_ABOVE_OPEN_CLOSE.to_string());
        }
    }

    let adjusted_close = match &raw.adjusted_close {
        None => Some(None),
        Some(_) => positive(&raw.adjusted_close).map(Some),
    };
    if adjusted_close.is_none() {
        errors.push(ADJUSTED_CLOSE_NOT_POSITIVE.to_string());
    }

    let (
        Some(symbol),
        Some(timestamp),
        Some(open),
        Some(high),
        Some(low),
        Some(close),
        Some(volume),
        Some(adjusted_close),
    ) = (symbol, timestamp, open, high, low, close, volume, adjusted_close)
    else {
        return Err(ValidationResult::from_errors(errors));
    };
    if !errors.is_empty() {
        return Err(ValidationResult::from_errors(errors));
    }

    Ok(PriceBar {
        symbol: symbol.to_string(),
        timestamp,
        open,
        high,
        low,
        close,
        volume,
        adjusted_close,
    })
}

fn finite(field: &Option<RawField>) -> Option<f64> {
    field
        .as_ref()
        .and_then(RawField::as_number)
        .filter(|value| value.is_finite())
}

fn positive(field: &Option<RawField>) -> Option<f64> {
    finite(field).filter(|value| *value > 0.0)
}

/// Accepts RFC 3339 text, a bare `YYYY-MM-DD` date (midnight UTC), or
/// integral epoch milliseconds.
fn parse_timestamp(field: &RawField) -> Option<DateTime<Utc>> {
    match field {
        RawField::Text(text) => {
            let text = text.trim();
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Some(parsed.with_timezone(&Utc));
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|midnight| Utc.from_utc_datetime(&midnight))
        }
        RawField::Number(millis) if millis.is_finite() && millis.fract() == 0.0 => {
            DateTime::from_timestamp_millis(*millis as i64)
        }
        _ => None,
    }
}
