//! Global configuration
//!
//! Thread-safe configuration singleton holding log levels and runtime limits.
//!
//! # Example
//! ```
//! use squire::core::config::{Config, LogConfig, init, config};
//! use tracing::Level;
//!
//! let cfg = Config {
//!     log: LogConfig {
//!         global: Level::DEBUG,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! init(cfg);
//! assert_eq!(config().log.global, Level::DEBUG);
//! ```

use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::Deserialize;
use thiserror::Error;
use tracing::Level;

pub use squire_config::{Component, LimitConfig};

static GLOBAL_CONFIG: OnceCell<Config> = OnceCell::new();

/// Initialize the global configuration (call once, before anything else)
///
/// # Panics
/// Panics if the configuration is already initialized
pub fn init(config: Config) {
    if GLOBAL_CONFIG.set(config).is_err() {
        panic!("Config already initialized");
    }
}

/// The global configuration
///
/// # Panics
/// Panics if the configuration has not been initialized
pub fn config() -> &'static Config {
    match GLOBAL_CONFIG.get() {
        Some(config) => config,
        None => panic!("Config not initialized"),
    }
}

/// Whether the global configuration has been initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Global configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Logging
    pub log: LogConfig,
    /// Runtime limits
    pub limits: LimitConfig,
}

/// Log levels, globally and per runtime component
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default level
    pub global: Level,
    /// Value operations (`None` falls back to `global`)
    pub value: Option<Level>,
    pub book: Option<Level>,
    pub codex: Option<Level>,
    pub exception: Option<Level>,
}

impl LogConfig {
    /// Effective level for `component`
    ///
    /// A component-specific level wins over the global one.
    pub fn level_for(&self, component: Component) -> Level {
        let specific = match component {
            Component::Value => self.value,
            Component::Book => self.book,
            Component::Codex => self.codex,
            Component::Exception => self.exception,
        };
        specific.unwrap_or(self.global)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::INFO,
            value: None,
            book: None,
            codex: None,
            exception: None,
        }
    }
}

// ==================== JSON documents ====================

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLogConfig {
    global: Option<String>,
    value: Option<String>,
    book: Option<String>,
    codex: Option<String>,
    exception: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    log: RawLogConfig,
    limits: LimitConfig,
}

fn parse_level(name: Option<String>) -> Result<Option<Level>, ConfigError> {
    name.map(|name| Level::from_str(&name).map_err(|_| ConfigError::InvalidLevel(name)))
        .transpose()
}

impl Config {
    /// Parse a JSON configuration document
    ///
    /// Every field is optional; levels are named `"trace"` through `"error"`.
    ///
    /// ```
    /// use squire::core::config::Config;
    ///
    /// let cfg = Config::from_json(r#"{"log": {"book": "trace"}}"#).unwrap();
    /// assert_eq!(cfg.log.book, Some(tracing::Level::TRACE));
    /// ```
    pub fn from_json(source: &str) -> Result<Config, ConfigError> {
        let raw: RawConfig = serde_json::from_str(source)?;
        let defaults = LogConfig::default();

        let log = LogConfig {
            global: parse_level(raw.log.global)?.unwrap_or(defaults.global),
            value: parse_level(raw.log.value)?,
            book: parse_level(raw.log.book)?,
            codex: parse_level(raw.log.codex)?,
            exception: parse_level(raw.log.exception)?,
        };

        Ok(Config {
            log,
            limits: raw.limits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.log.global, Level::INFO);
        assert_eq!(cfg.limits.max_exception_handlers, 2048);
    }

    #[test]
    fn test_log_level_for() {
        let cfg = LogConfig {
            global: Level::WARN,
            book: Some(Level::TRACE),
            ..Default::default()
        };

        assert_eq!(cfg.level_for(Component::Book), Level::TRACE);
        assert_eq!(cfg.level_for(Component::Codex), Level::WARN);
    }

    #[test]
    fn test_from_json() {
        let cfg = Config::from_json(
            r#"{
                "log": {"global": "warn", "exception": "debug"},
                "limits": {"max_exception_handlers": 64}
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.log.global, Level::WARN);
        assert_eq!(cfg.log.exception, Some(Level::DEBUG));
        assert_eq!(cfg.log.value, None);
        assert_eq!(cfg.limits.max_exception_handlers, 64);
    }

    #[test]
    fn test_from_empty_json() {
        let cfg = Config::from_json("{}").unwrap();
        assert_eq!(cfg.log.global, Level::INFO);
        assert_eq!(cfg.limits, LimitConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_level() {
        let err = Config::from_json(r#"{"log": {"codex": "loud"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel(ref name) if name == "loud"));
        assert_eq!(err.to_string(), "invalid log level 'loud'");
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let err = Config::from_json(r#"{"log": 3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
