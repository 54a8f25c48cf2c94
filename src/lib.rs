//! Squire - value and container runtime
//!
//! Runtime values, the book and codex aggregates, and the exception-handler
//! stack of the Squire scripting language.
//!
//! # Architecture
//!
//! ```text
//! squire-config/  - Pure configuration data (limits, log components)
//! squire-core/    - Values, books, codexes, exception handling
//! src/
//! ├── api/        - Top-level region and script-facing accessors
//! └── core/       - Global configuration and logger set-up
//! ```
//!
//! # Quick Start
//!
//! ```
//! use squire::{init, run, Book, Config, Value};
//!
//! init(Config::default());
//! let text = run(|| {
//!     let book: Book = (1..=3).map(Value::number).collect();
//!     Ok(book.to_text())
//! })
//! .unwrap();
//! assert_eq!(text, "[1, 2, 3]");
//! ```

// Configuration and logging
pub mod core;

// Public API
pub mod api;

// Re-export common types
pub use api::{delete_page, get_page, insert_page, run, set_page, SquireError};
pub use crate::core::{
    config::config, config::init as init_config, logger::init_logger, logger::LogFormat, Component,
    Config, ConfigError, LimitConfig, LogConfig,
};
pub use squire_core::runtime::exception::{protect, Exception};
pub use squire_core::{throw, Book, Codex, ExceptionStack, Function, Journey, Kind, Instance, Number, Value};

/// Initialize (call before use)
///
/// Installs the global configuration and sizes the calling thread's handler
/// stack from it. Does not set up logging.
pub fn init(config: Config) {
    squire_core::runtime::exception::configure(&config.limits);
    crate::core::config::init(config);
}

/// Initialize configuration and logging
///
/// # Example
/// ```ignore
/// use squire::{init_with_logger, Config, LogFormat};
///
/// init_with_logger(Config::default(), LogFormat::Compact);
/// ```
pub fn init_with_logger(config: Config, format: LogFormat) {
    init(config);
    crate::core::logger::init_with_format(format);
}

/// Parse a JSON configuration document and initialize with it
///
/// # Errors
/// Returns `SquireError::Config` if the document is malformed
pub fn init_from_json(source: &str) -> Result<(), SquireError> {
    init(Config::from_json(source)?);
    Ok(())
}
