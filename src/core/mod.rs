//! Core - configuration and logging
//!
//! Process-wide state around the runtime: the configuration singleton and the
//! tracing subscriber set-up. The runtime itself lives in `squire-core`.

pub mod config;
pub mod logger;

// Re-export common types
pub use config::{Component, Config, ConfigError, LimitConfig, LogConfig};
