//! [`Config`]-related definitions.

use std::{num::NonZeroUsize, path::PathBuf, time};

use common::money::Currency;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::infra::rest;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API configuration.
    pub api: Api,

    /// Session configuration.
    pub session: Session,

    /// Marketplace configuration.
    pub marketplace: Marketplace,

    /// Log configuration.
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

/// Backend API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL of the backend API.
    #[default("http://127.0.0.1:8000/api/".to_owned())]
    pub base_url: String,

    /// Style of offer transition requests the backend understands.
    pub style: rest::Style,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,

    /// Currency the backend keeps amounts in.
    #[default(Currency::Inr)]
    pub currency: Currency,
}

impl From<&Api> for rest::Config {
    fn from(value: &Api) -> Self {
        let Api {
            base_url,
            style,
            timeout,
            currency,
        } = value;

        Self {
            base_url: base_url.clone(),
            style: *style,
            timeout: *timeout,
            currency: *currency,
        }
    }
}

impl From<&Api> for service::Config {
    fn from(value: &Api) -> Self {
        Self {
            currency: value.currency,
        }
    }
}

/// Session configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Session {
    /// Path to the file the session is remembered in.
    #[default(PathBuf::from("session.json"))]
    pub path: PathBuf,
}

/// Marketplace configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Marketplace {
    /// Number of packages on a single page.
    #[default(NonZeroUsize::MIN.saturating_add(5))]
    pub page_size: NonZeroUsize,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    Info,

    /// Designates hazardous situations.
    #[default]
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
