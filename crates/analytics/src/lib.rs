//! # Analytics
//!
//! This crate derives return series and risk/performance statistics from
//! price series that have already been validated and fetched by a caller.
//!
//! ## Architectural Principles
//!
//! - **Pure logic crate:** No I/O, no shared state. Every function is a
//!   synchronous computation over data already in memory, so it can be called
//!   from any number of threads without coordination.
//! - **Total statistics:** The functions in [`stats`] never fail. Empty input,
//!   zero variance and mismatched lengths resolve to documented values.
//! - **Defended boundaries:** Untyped input is converted with
//!   [`series_from_json`], and the [`AnalyticsEngine`] rejects non-finite or
//!   non-positive prices, surfacing an `AnalyticsError` immediately.
//! - **One annualisation convention:** [`TRADING_PERIODS_PER_YEAR`] (252) is
//!   shared by Sharpe and volatility so metrics are comparable across calls.
//!
//! ## Public API
//!
//! - `returns`, `mean`, `standard_deviation`, `sharpe_ratio`, `max_drawdown`,
//!   `volatility`, `win_rate`, `profit_factor`, `correlation`, `beta`.
//! - `ProfitFactor`: A finite ratio or the `Infinite` sentinel.
//! - `AnalyticsEngine`: Builds a `PerformanceReport` from a price series.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod input;
pub mod report;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use input::{parse_series, series_from_json};
pub use report::PerformanceReport;
pub use stats::{
    beta, correlation, max_drawdown, mean, profit_factor, returns, sharpe_ratio,
    standard_deviation, volatility, win_rate, ProfitFactor, DEFAULT_RISK_FREE_RATE,
    TRADING_PERIODS_PER_YEAR,
};
