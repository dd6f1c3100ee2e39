use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration structure for the analytics engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub analytics: AnalyticsSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Parameters for metric calculation.
///
/// The annualisation factor is deliberately absent: it is a compiled-in
/// constant of the analytics crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Annual risk-free rate used by the Sharpe ratio (e.g. 0.02 for 2%).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
}

/// Parameters for the tracing subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as "info" or "ingest=debug,warn".
    /// `RUST_LOG` takes precedence when it is set.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_ansi")]
    pub ansi: bool,
    /// When set, logs go to a daily-rolling file in this directory instead of stdout.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

pub(crate) fn default_risk_free_rate() -> f64 {
    0.02
}

pub(crate) fn default_level() -> String {
    "info".to_string()
}

pub(crate) fn default_ansi() -> bool {
    true
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            ansi: default_ansi(),
            directory: None,
        }
    }
}

impl Settings {
    /// Checks values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.analytics.risk_free_rate.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "analytics.risk_free_rate must be finite, got {}",
                self.analytics.risk_free_rate
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.analytics.risk_free_rate, 0.02);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.directory.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_rate() {
        let mut settings = Settings::default();
        settings.analytics.risk_free_rate = f64::NAN;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("risk_free_rate")
        ));
    }

    #[test]
    fn rejects_blank_level() {
        let mut settings = Settings::default();
        settings.logging.level = "  ".to_string();
        assert!(settings.validate().is_err());
    }
}
