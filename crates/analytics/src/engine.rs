use crate::error::AnalyticsError;
use crate::report::PerformanceReport;
use crate::stats::{self, DEFAULT_RISK_FREE_RATE};
use configuration::AnalyticsSettings;
use core_types::TimeSeries;

/// A stateless calculator for deriving performance metrics from a price series.
///
/// Unlike the free functions in [`crate::stats`], the engine defends its
/// input: it refuses non-finite or non-positive prices and benchmarks of a
/// different length instead of producing a misleading report.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEngine {
    risk_free_rate: f64,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

impl AnalyticsEngine {
    /// Creates an engine that computes Sharpe ratios against `risk_free_rate`.
    pub fn new(risk_free_rate: f64) -> Result<Self, AnalyticsError> {
        if !risk_free_rate.is_finite() {
            return Err(AnalyticsError::InvalidParameter(format!(
                "risk-free rate must be finite, got {risk_free_rate}"
            )));
        }
        Ok(Self { risk_free_rate })
    }

    pub fn from_settings(settings: &AnalyticsSettings) -> Result<Self, AnalyticsError> {
        Self::new(settings.risk_free_rate)
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `prices` - Chronologically ordered prices of the asset.
    /// * `benchmark` - Optional prices of a reference series over the same periods,
    ///   used for correlation and beta of the return series.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `PerformanceReport` or an `AnalyticsError`.
    #[tracing::instrument(name = "analytics_calculate", skip_all, fields(prices = prices.len()))]
    pub fn calculate(
        &self,
        prices: &[f64],
        benchmark: Option<&[f64]>,
    ) -> Result<PerformanceReport, AnalyticsError> {
        check_prices("prices", prices)?;
        if let Some(benchmark) = benchmark {
            check_prices("benchmark", benchmark)?;
            if benchmark.len() != prices.len() {
                return Err(AnalyticsError::LengthMismatch {
                    expected: prices.len(),
                    found: benchmark.len(),
                });
            }
        }

        let mut report = PerformanceReport::new(self.risk_free_rate);
        let returns = stats::returns(prices);

        if let Some(benchmark) = benchmark {
            self.calculate_relative(&returns, &stats::returns(benchmark), &mut report);
        }

        if returns.is_empty() {
            // A single price (or none) has no returns; most metrics stay zero.
            tracing::debug!("Fewer than two prices, returning a zeroed report.");
            return Ok(report);
        }

        self.calculate_profitability(prices, &returns, &mut report);
        self.calculate_risk(prices, &returns, &mut report);

        Ok(report)
    }

    /// Calculates metrics over the adjusted closes of a validated series.
    pub fn calculate_series(
        &self,
        series: &TimeSeries,
        benchmark: Option<&TimeSeries>,
    ) -> Result<PerformanceReport, AnalyticsError> {
        let prices = series.adjusted_closes();
        let benchmark = benchmark.map(TimeSeries::adjusted_closes);
        self.calculate(&prices, benchmark.as_deref())
    }

    /// Calculates all return-related metrics.
    fn calculate_profitability(
        &self,
        prices: &[f64],
        returns: &[f64],
        report: &mut PerformanceReport,
    ) {
        report.observations = returns.len();
        if let (Some(first), Some(last)) = (prices.first(), prices.last()) {
            report.total_return = (last - first) / first;
        }
        report.win_rate = stats::win_rate(returns);
        report.profit_factor = stats::profit_factor(returns);
    }

    /// Calculates volatility, Sharpe and drawdown.
    fn calculate_risk(&self, prices: &[f64], returns: &[f64], report: &mut PerformanceReport) {
        report.annualized_volatility = stats::volatility(returns, true);
        report.sharpe_ratio = stats::sharpe_ratio(returns, self.risk_free_rate);
        report.max_drawdown = stats::max_drawdown(prices);
    }

    /// Calculates correlation and beta against the benchmark's returns.
    fn calculate_relative(
        &self,
        returns: &[f64],
        benchmark_returns: &[f64],
        report: &mut PerformanceReport,
    ) {
        report.correlation = Some(stats::correlation(returns, benchmark_returns));
        report.beta = Some(stats::beta(returns, benchmark_returns));
    }
}

fn check_prices(series: &'static str, prices: &[f64]) -> Result<(), AnalyticsError> {
    for (index, &value) in prices.iter().enumerate() {
        if !value.is_finite() {
            return Err(AnalyticsError::NonFiniteInput {
                series,
                index,
                value,
            });
        }
        if value <= 0.0 {
            return Err(AnalyticsError::NonPositivePrice {
                series,
                index,
                value,
            });
        }
    }
    Ok(())
}
