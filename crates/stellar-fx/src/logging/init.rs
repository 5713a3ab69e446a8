use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax ("info", "stellar_fx=debug,wgpu=warn").
/// When unset, `RUST_LOG` is consulted, then a built-in default.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

/// Filter string to parse, or `None` for the built-in default.
fn effective_filter(config: &LoggingConfig, rust_log: Option<String>) -> Option<String> {
    config
        .env_filter
        .clone()
        .or(rust_log)
        .filter(|f| !f.trim().is_empty())
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the `log` backend, once per process.
///
/// Later calls are ignored, as is a logger already installed by the host.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match effective_filter(&config, std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                // wgpu is chatty at info.
                builder.filter_level(log::LevelFilter::Info);
                builder.filter_module("wgpu_core", log::LevelFilter::Warn);
                builder.filter_module("wgpu_hal", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_beats_rust_log() {
        let config = LoggingConfig::with_filter("warn");
        assert_eq!(
            effective_filter(&config, Some("trace".to_string())).as_deref(),
            Some("warn")
        );
    }

    #[test]
    fn rust_log_used_when_no_explicit_filter() {
        let config = LoggingConfig::default();
        assert_eq!(
            effective_filter(&config, Some("stellar_fx=debug".to_string())).as_deref(),
            Some("stellar_fx=debug")
        );
    }

    #[test]
    fn blank_filters_fall_back_to_default() {
        assert_eq!(effective_filter(&LoggingConfig::default(), None), None);
        assert_eq!(effective_filter(&LoggingConfig::with_filter("  "), None), None);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(LoggingConfig::with_filter("off"));
        init_logging(LoggingConfig::default());
    }
}
