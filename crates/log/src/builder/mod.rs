//! Logger builder implementation

#[macro_use]
mod format;

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};
use crate::writer;

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard returned by a successful initialization
///
/// Keep it alive for as long as logging is needed.
#[derive(Debug)]
#[must_use = "dropping the guard immediately is almost always a mistake"]
pub struct LoggerGuard {
    format: Option<Format>,
}

/// Install the subscriber, with or without timestamps.
macro_rules! init_subscriber {
    ($filter:expr, $fmt_layer:expr, $time:expr) => {{
        let layer = $fmt_layer;
        if $time {
            Registry::default().with($filter).with(layer).try_init()
        } else {
            Registry::default()
                .with($filter)
                .with(layer.without_time())
                .try_init()
        }
    }};
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Override the level filter
    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    /// Override the output format
    #[must_use]
    pub fn format(mut self, format: Format) -> Self {
        self.config.format = format;
        self
    }

    /// Parse the configured filter
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            filter: self.config.level.clone(),
            reason: e.to_string(),
        })
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = self.filter()?;
        let writer = writer::make_writer(self.config.writer);
        let display = &self.config.display;

        let result = match self.config.format {
            Format::Pretty => {
                init_subscriber!(filter, create_fmt_layer!(pretty, display, writer), display.time)
            }
            Format::Compact => {
                init_subscriber!(filter, create_fmt_layer!(compact, display, writer), display.time)
            }
            Format::Json => {
                init_subscriber!(filter, create_json_layer!(display, writer), display.time)
            }
        };
        result.map_err(|e| LogError::Init(e.to_string()))?;

        tracing::debug!(level = %self.config.level, format = ?self.config.format, "logger initialized");
        Ok(LoggerGuard {
            format: Some(self.config.format),
        })
    }
}

impl LoggerGuard {
    /// Guard for a logger that was already installed elsewhere
    pub(crate) fn noop() -> Self {
        Self { format: None }
    }

    /// Format of the installed logger, if this call installed it
    pub fn format(&self) -> Option<Format> {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_rejected() {
        let builder = LoggerBuilder::from_config(Config::test()).level("nebula=notalevel");
        assert!(matches!(builder.filter(), Err(LogError::Filter { .. })));
    }

    #[test]
    fn test_valid_filter() {
        let builder = LoggerBuilder::from_config(Config::test())
            .level("info,nebula_introspect=trace")
            .format(Format::Json);
        assert!(builder.filter().is_ok());
    }
}
