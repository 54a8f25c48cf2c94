//! Logger initialization
//!
//! Built on `tracing` and `tracing-subscriber`, with one log target per
//! runtime component so each can be filtered on its own.
//!
//! # Example
//! ```ignore
//! use squire::core::config::{Config, init};
//! use squire::core::logger::init_logger;
//!
//! init(Config::default());
//! init_logger();
//! ```

use std::io;

use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use crate::core::config::{self, Component};

/// Log output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Colored, multi-line (development)
    #[default]
    Pretty,
    /// Single line
    Compact,
    /// JSON (tool integration)
    Json,
}

/// Initialize logging with the default format
///
/// Must be called after `config::init()`.
pub fn init_logger() {
    init_with_format(LogFormat::default());
}

/// Initialize logging to stdout with `format`
pub fn init_with_format(format: LogFormat) {
    let layer = create_format_layer(format, io::stdout).with_filter(targets());
    tracing_subscriber::registry().with(layer).init();
}

/// Per-component target filter derived from the global configuration
///
/// # Panics
/// Panics if the configuration has not been initialized
fn targets() -> Targets {
    if !config::is_initialized() {
        panic!("Config must be initialized before logger");
    }

    let cfg = &config::config().log;

    Component::ALL
        .iter()
        .fold(Targets::new().with_default(cfg.global), |targets, &component| {
            targets.with_target(component.target(), cfg.level_for(component))
        })
}

/// Build the formatting layer for `format`
fn create_format_layer<W, F>(format: LogFormat, make_writer: F) -> impl Layer<tracing_subscriber::Registry>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
    }
}

/// Simple logger for the current test (prints through the test harness)
#[cfg(test)]
pub fn init_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Whether debug logging is on for `component`
#[inline]
pub fn is_enabled(component: Component) -> bool {
    match component {
        Component::Value => tracing::enabled!(target: "squire::value", tracing::Level::DEBUG),
        Component::Book => tracing::enabled!(target: "squire::book", tracing::Level::DEBUG),
        Component::Codex => tracing::enabled!(target: "squire::codex", tracing::Level::DEBUG),
        Component::Exception => tracing::enabled!(target: "squire::exception", tracing::Level::DEBUG),
    }
}
