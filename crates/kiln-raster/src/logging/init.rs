use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "kiln_raster=trace,kiln_studio=debug"). When absent, `RUST_LOG` is consulted and
/// `default_level` applies if that is unset too.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub fn with_default_level(mut self, level: LevelFilter) -> Self {
        self.default_level = level;
        self
    }

    fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &self.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(self.default_level);
        }

        builder.write_style(self.write_style);
        builder
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; later calls are ignored. If another logger was installed first the
/// call is a no-op as well.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if config.builder().try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

/// Captured logger for `cargo test`, honouring `RUST_LOG`.
pub fn init_test_logging() {
    let _ = env_logger::Builder::from_default_env().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_info() {
        let c = LoggingConfig::default();
        assert!(c.env_filter.is_none());
        assert_eq!(c.default_level, LevelFilter::Info);
    }

    #[test]
    fn builders_override_fields() {
        let c = LoggingConfig::default().with_filter("kiln_raster=trace").with_default_level(LevelFilter::Warn);
        assert_eq!(c.env_filter.as_deref(), Some("kiln_raster=trace"));
        assert_eq!(c.default_level, LevelFilter::Warn);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_test_logging();
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
        log::trace!("still alive");
    }
}
