//! [`Config`]-related definitions.

use std::{num::NonZeroUsize, time};

use common::pagination;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Remote source configuration.
    #[serde(default)]
    pub source: Source,

    /// Views configuration.
    #[serde(default)]
    pub view: View,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Remote source configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Source {
    /// URL of the users collection.
    #[default("https://jsonplaceholder.typicode.com/users".to_owned())]
    pub base_url: String,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Source> for service::infra::http::Config {
    fn from(value: Source) -> Self {
        let Source { base_url, timeout } = value;
        Self { base_url, timeout }
    }
}

/// Views configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct View {
    /// Number of users on a single page.
    #[default(pagination::DEFAULT_SIZE)]
    pub page_size: NonZeroUsize,

    /// Quiet period after which a typed search query is applied.
    #[default(service::view::debounce::DEFAULT_QUIET_PERIOD)]
    #[serde(with = "humantime_serde")]
    pub debounce: time::Duration,
}

impl From<View> for service::Config {
    fn from(value: View) -> Self {
        let View {
            page_size,
            debounce,
        } = value;
        Self {
            view: service::view::Config {
                page_size,
                quiet_period: debounce,
            },
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use config::{builder::DefaultState, ConfigBuilder, File, FileFormat};

    use super::{Config, LogLevel};

    fn parse(toml: &str) -> Config {
        ConfigBuilder::<DefaultState>::default()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_missing_file() {
        let conf = Config::new("definitely-missing.toml").unwrap();

        assert_eq!(
            conf.source.base_url,
            "https://jsonplaceholder.typicode.com/users",
        );
        assert_eq!(conf.source.timeout, Duration::from_secs(30));
        assert_eq!(conf.view.page_size.get(), 5);
        assert_eq!(conf.view.debounce, Duration::from_millis(500));
        assert_eq!(conf.log.level, LogLevel::Info);
    }

    #[test]
    fn reads_partial_file() {
        let conf = parse(
            r#"
            [source]
            base_url = "http://localhost:8080/users"

            [view]
            page_size = 10
            debounce = "250ms"

            [log]
            level = "DEBUG"
            "#,
        );

        assert_eq!(conf.source.base_url, "http://localhost:8080/users");
        assert_eq!(conf.source.timeout, Duration::from_secs(30));
        assert_eq!(conf.view.page_size.get(), 10);
        assert_eq!(conf.view.debounce, Duration::from_millis(250));
        assert_eq!(conf.log.level, LogLevel::Debug);

        let service: service::Config = conf.view.into();
        assert_eq!(service.view.quiet_period, Duration::from_millis(250));
    }

    #[test]
    fn rejects_zero_page_size() {
        let toml = "[view]\npage_size = 0";
        let result = ConfigBuilder::<DefaultState>::default()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize::<Config>();

        assert!(result.is_err());
    }
}
