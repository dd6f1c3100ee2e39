use crate::stats::ProfitFactor;
use serde::{Deserialize, Serialize};

/// A standardized report of the risk and performance of one price series.
///
/// This struct is the final output of the `AnalyticsEngine` and serves as the
/// data transfer object handed to report collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    // I. Sample
    /// Number of per-period returns the metrics were computed from.
    pub observations: usize,

    // II. Return
    /// Last price over first price, minus one.
    pub total_return: f64,
    pub win_rate: f64,
    pub profit_factor: ProfitFactor,

    // III. Risk
    pub annualized_volatility: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    /// The rate the Sharpe ratio was computed against.
    pub risk_free_rate: f64,

    // IV. Relative to a benchmark
    pub correlation: Option<f64>, // None when no benchmark was supplied
    pub beta: Option<f64>,
}

impl PerformanceReport {
    /// Creates a new, zeroed-out PerformanceReport, which is also the
    /// report of a series too short to produce a single return.
    pub fn new(risk_free_rate: f64) -> Self {
        Self {
            observations: 0,
            total_return: 0.0,
            win_rate: 0.0,
            profit_factor: ProfitFactor::Finite(1.0),
            annualized_volatility: 0.0,
            sharpe_ratio: 0.0,
            max_drawdown: 0.0,
            risk_free_rate,
            correlation: None,
            beta: None,
        }
    }
}
