use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `settings.level`. Only one subscriber can be
/// installed per process; a second call returns `ConfigError::TracingInit`.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), ConfigError> {
    let filter = build_filter(settings)?;

    let (writer, ansi) = match &settings.directory {
        Some(directory) => (
            BoxMakeWriter::new(tracing_appender::rolling::daily(directory, "quantlab.log")),
            false,
        ),
        None => (BoxMakeWriter::new(std::io::stdout), settings.ansi),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .try_init()
        .map_err(|e| ConfigError::TracingInit(e.to_string()))
}

fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, ConfigError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&settings.level).map_err(|e| {
        ConfigError::ValidationError(format!("invalid log level '{}': {e}", settings.level))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_builds_a_filter() {
        let settings = LoggingSettings {
            level: "ingest=debug,warn".to_string(),
            ..LoggingSettings::default()
        };
        assert!(build_filter(&settings).is_ok());
    }

    #[test]
    fn second_install_is_reported() {
        let settings = LoggingSettings::default();
        let first = init_tracing(&settings);
        let second = init_tracing(&settings);
        // Another test binary may already own the global subscriber.
        assert!(first.is_ok() || matches!(first, Err(ConfigError::TracingInit(_))));
        assert!(matches!(second, Err(ConfigError::TracingInit(_))));
    }
}
