//! Pure risk and performance statistics over ordered numeric series.
//!
//! Every function here is total: empty input, zero variance and mismatched
//! lengths resolve to a defined value instead of an error. All reductions
//! run as a single left-to-right pass in plain `f64` arithmetic.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Periods per year used for every annualisation (daily bars, trading days).
pub const TRADING_PERIODS_PER_YEAR: f64 = 252.0;

/// Annual risk-free rate assumed when the caller has no better figure.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Fractional change between consecutive prices. `N` prices give `N - 1` returns.
pub fn returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

/// Arithmetic mean, `0` for an empty series.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().fold(0.0, |acc, value| acc + value) / values.len() as f64
}

/// Population standard deviation (divides by `N`), `0` for an empty series.
///
/// A series whose elements are all equal has exactly zero deviation, even
/// where the rounded mean differs from the elements in the last bit.
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() || is_constant(values) {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values
        .iter()
        .fold(0.0, |acc, value| acc + (value - avg) * (value - avg))
        / values.len() as f64;
    variance.sqrt()
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Annualised Sharpe ratio of a per-period return series.
///
/// Returns `0` for an empty series and for a series with no dispersion.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let std_dev = standard_deviation(returns);
    if std_dev == 0.0 {
        return 0.0;
    }

    let annualized_return = mean(returns) * TRADING_PERIODS_PER_YEAR;
    let annualized_std = std_dev * TRADING_PERIODS_PER_YEAR.sqrt();
    (annualized_return - risk_free_rate) / annualized_std
}

/// Largest fractional decline from a running peak, scanning left to right.
pub fn max_drawdown(prices: &[f64]) -> f64 {
    let Some((&first, rest)) = prices.split_first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_drawdown = 0.0_f64;
    for &price in rest {
        if price > peak {
            peak = price;
        } else {
            max_drawdown = max_drawdown.max((peak - price) / peak);
        }
    }
    max_drawdown
}

/// Standard deviation of returns, scaled by `sqrt(252)` when `annualize` is set.
pub fn volatility(returns: &[f64], annualize: bool) -> f64 {
    let std_dev = standard_deviation(returns);
    if annualize {
        std_dev * TRADING_PERIODS_PER_YEAR.sqrt()
    } else {
        std_dev
    }
}

/// Share of strictly positive returns, `0` for an empty series.
pub fn win_rate(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let wins = returns.iter().filter(|r| **r > 0.0).count();
    wins as f64 / returns.len() as f64
}

/// Gross gains over gross losses.
///
/// A series with wins but no losses has no finite profit factor; it is
/// reported as [`ProfitFactor::Infinite`] rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfitFactor {
    Finite(f64),
    Infinite,
}

impl ProfitFactor {
    /// The factor as an `f64`, mapping `Infinite` to `f64::INFINITY`.
    pub fn value(&self) -> f64 {
        match self {
            ProfitFactor::Finite(value) => *value,
            ProfitFactor::Infinite => f64::INFINITY,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, ProfitFactor::Infinite)
    }
}

impl fmt::Display for ProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitFactor::Finite(value) => write!(f, "{value}"),
            ProfitFactor::Infinite => f.write_str("Infinity"),
        }
    }
}

impl Serialize for ProfitFactor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ProfitFactor::Finite(value) => serializer.serialize_f64(*value),
            ProfitFactor::Infinite => serializer.serialize_str("Infinity"),
        }
    }
}

impl<'de> Deserialize<'de> for ProfitFactor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(f64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Number(value) => Ok(ProfitFactor::Finite(value)),
            Wire::Text(text) if text.eq_ignore_ascii_case("infinity") => Ok(ProfitFactor::Infinite),
            Wire::Text(text) => Err(D::Error::custom(format!(
                "expected a number or \"Infinity\", found \"{text}\""
            ))),
        }
    }
}

/// Profit factor of a return series.
///
/// No returns at all, or neither wins nor losses, gives `Finite(1.0)`;
/// wins without losses gives `Infinite`.
pub fn profit_factor(returns: &[f64]) -> ProfitFactor {
    let mut gross_profit = 0.0;
    let mut gross_loss = 0.0;
    let mut wins = 0usize;
    let mut losses = 0usize;

    for &r in returns {
        if r > 0.0 {
            gross_profit += r;
            wins += 1;
        } else if r < 0.0 {
            gross_loss += r;
            losses += 1;
        }
    }

    if losses == 0 {
        return if wins > 0 {
            ProfitFactor::Infinite
        } else {
            ProfitFactor::Finite(1.0)
        };
    }

    let gross_loss = f64::abs(gross_loss);
    if gross_loss == 0.0 {
        return ProfitFactor::Infinite;
    }
    ProfitFactor::Finite(gross_profit / gross_loss)
}

/// Pearson correlation of two equal-length series.
///
/// Mismatched lengths, empty input and zero variance all give `0`.
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() || is_constant(a) || is_constant(b) {
        return 0.0;
    }

    let mean_a = mean(a);
    let mean_b = mean(b);
    let mut numerator = 0.0;
    let mut sum_sq_a = 0.0;
    let mut sum_sq_b = 0.0;

    for (x, y) in a.iter().zip(b) {
        let diff_a = x - mean_a;
        let diff_b = y - mean_b;
        numerator += diff_a * diff_b;
        sum_sq_a += diff_a * diff_a;
        sum_sq_b += diff_b * diff_b;
    }

    let denominator = (sum_sq_a * sum_sq_b).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Sensitivity of `asset` returns to `market` returns:
/// correlation scaled by the ratio of their standard deviations.
pub fn beta(asset: &[f64], market: &[f64]) -> f64 {
    if asset.len() != market.len() || asset.is_empty() {
        return 0.0;
    }

    let market_std = standard_deviation(market);
    if market_std == 0.0 {
        return 0.0;
    }
    correlation(asset, market) * (standard_deviation(asset) / market_std)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn returns_need_two_prices() {
        assert!(returns(&[]).is_empty());
        assert!(returns(&[100.0]).is_empty());
    }

    #[test]
    fn returns_between_consecutive_prices() {
        let r = returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(r[1], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn mean_and_std_of_empty_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(standard_deviation(&[]), 0.0);
    }

    #[test]
    fn standard_deviation_is_population() {
        // Population std of 2,4,4,4,5,5,7,9 is exactly 2.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), 5.0);
        assert_relative_eq!(standard_deviation(&values), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn sharpe_of_empty_or_flat_series_is_zero() {
        assert_eq!(sharpe_ratio(&[], 0.05), 0.0);
        assert_eq!(sharpe_ratio(&[0.01, 0.01, 0.01], DEFAULT_RISK_FREE_RATE), 0.0);
        assert_eq!(sharpe_ratio(&[-0.2; 4], 0.0), 0.0);
        assert_eq!(sharpe_ratio(&[0.1; 7], 0.0), 0.0);
        assert_eq!(sharpe_ratio(&[0.001; 252], 0.02), 0.0);
    }

    #[test]
    fn sharpe_is_annualised() {
        let r = [0.01, -0.005, 0.02, 0.0];
        let expected = (mean(&r) * 252.0 - 0.02) / (standard_deviation(&r) * 252.0_f64.sqrt());
        assert_relative_eq!(sharpe_ratio(&r, DEFAULT_RISK_FREE_RATE), expected, epsilon = 1e-12);
        assert!(sharpe_ratio(&r, 0.0) > sharpe_ratio(&r, 0.5));
    }

    #[test]
    fn max_drawdown_tracks_running_peak() {
        assert_relative_eq!(max_drawdown(&[100.0, 120.0, 90.0, 150.0, 60.0]), 0.6, epsilon = 1e-12);
        assert_eq!(max_drawdown(&[]), 0.0);
        assert_eq!(max_drawdown(&[42.0]), 0.0);
        assert_eq!(max_drawdown(&[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn volatility_annualises_on_request() {
        let r = [0.01, -0.02, 0.015];
        let raw = volatility(&r, false);
        assert_relative_eq!(raw, standard_deviation(&r));
        assert_relative_eq!(volatility(&r, true), raw * 252.0_f64.sqrt(), epsilon = 1e-15);
        assert_eq!(volatility(&[], true), 0.0);
    }

    #[test]
    fn win_rate_counts_strictly_positive() {
        assert_eq!(win_rate(&[]), 0.0);
        assert_eq!(win_rate(&[0.1, 0.0, -0.1, 0.2]), 0.5);
    }

    #[test]
    fn profit_factor_sentinels() {
        assert_eq!(profit_factor(&[0.1, 0.2]), ProfitFactor::Infinite);
        assert_eq!(profit_factor(&[]), ProfitFactor::Finite(1.0));
        assert_eq!(profit_factor(&[0.0, 0.0]), ProfitFactor::Finite(1.0));
        assert_eq!(profit_factor(&[-0.1]), ProfitFactor::Finite(0.0));
    }

    #[test]
    fn profit_factor_ratio() {
        let pf = profit_factor(&[0.1, -0.2]);
        assert_relative_eq!(pf.value(), 0.5, epsilon = 1e-12);
        assert!(!pf.is_infinite());
        assert_eq!(ProfitFactor::Infinite.value(), f64::INFINITY);
    }

    #[test]
    fn profit_factor_serializes_infinite_as_text() {
        assert_eq!(serde_json::to_string(&ProfitFactor::Infinite).unwrap(), "\"Infinity\"");
        assert_eq!(serde_json::to_string(&ProfitFactor::Finite(1.5)).unwrap(), "1.5");
        let back: ProfitFactor = serde_json::from_str("\"Infinity\"").unwrap();
        assert!(back.is_infinite());
        assert!(serde_json::from_str::<ProfitFactor>("\"lots\"").is_err());
    }

    #[test]
    fn correlation_degenerate_cases() {
        assert_eq!(correlation(&[], &[]), 0.0);
        assert_eq!(correlation(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(correlation(&[0.5, 0.2, 0.9], &[0.1; 3]), 0.0);
    }

    #[test]
    fn correlation_is_symmetric_and_self_is_one() {
        let xs = [0.01, -0.02, 0.03, 0.005, -0.01];
        let ys = [0.02, -0.01, 0.01, 0.0, -0.03];
        assert_eq!(correlation(&xs, &ys), correlation(&ys, &xs));
        assert_relative_eq!(correlation(&xs, &xs), 1.0, epsilon = 1e-12);
        let negated: Vec<f64> = xs.iter().map(|x| -x).collect();
        assert_relative_eq!(correlation(&xs, &negated), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn beta_scales_correlation_by_std_ratio() {
        let market = [0.01, -0.02, 0.015, 0.0, -0.005];
        let levered: Vec<f64> = market.iter().map(|m| 2.0 * m).collect();
        assert_relative_eq!(beta(&levered, &market), 2.0, epsilon = 1e-12);
        assert_relative_eq!(beta(&market, &market), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn beta_degenerate_cases() {
        assert_eq!(beta(&[], &[]), 0.0);
        assert_eq!(beta(&[0.1, 0.2], &[0.1]), 0.0);
        assert_eq!(beta(&[0.1, 0.2], &[0.05, 0.05]), 0.0);
    }

    #[test]
    fn functions_are_deterministic() {
        let prices = [100.0, 101.5, 99.0, 103.2, 102.0];
        let r = returns(&prices);
        assert_eq!(sharpe_ratio(&r, 0.02).to_bits(), sharpe_ratio(&r, 0.02).to_bits());
        assert_eq!(max_drawdown(&prices).to_bits(), max_drawdown(&prices).to_bits());
        assert_abs_diff_eq!(win_rate(&r), 0.5);
    }
}
