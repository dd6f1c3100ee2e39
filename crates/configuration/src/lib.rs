use config::builder::{ConfigBuilder, DefaultState};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsSettings, LoggingSettings, Settings};
pub use error::ConfigError;
pub use telemetry::init_tracing;

/// Environment variables with this prefix override file values,
/// e.g. `QUANTLAB__ANALYTICS__RISK_FREE_RATE=0.03`.
pub const ENV_PREFIX: &str = "QUANTLAB";

/// Loads the application configuration.
///
/// Sources, lowest priority first: compiled defaults, an optional
/// `quantlab.toml` in the working directory, then `QUANTLAB__*` environment
/// variables.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = base_builder()?
        .add_source(config::File::with_name("quantlab").required(false))
        .add_source(environment());
    finish(builder)
}

/// Like [`load_config`], but reads the given file, which must exist.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let builder = base_builder()?
        .add_source(config::File::from(path.as_ref()))
        .add_source(environment());
    finish(builder)
}

fn base_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Settings::default();
    Ok(config::Config::builder()
        .set_default("analytics.risk_free_rate", defaults.analytics.risk_free_rate)?
        .set_default("logging.level", defaults.logging.level)?
        .set_default("logging.ansi", defaults.logging.ansi)?)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;
    tracing::debug!(
        risk_free_rate = settings.analytics.risk_free_rate,
        log_level = %settings.logging.level,
        "Configuration loaded."
    );
    Ok(settings)
}
