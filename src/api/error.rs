//! API error types

use thiserror::Error;

use crate::core::config::ConfigError;

/// Squire error type
#[derive(Error, Debug)]
pub enum SquireError {
    /// An exception escaped every protected region
    #[error("Uncaught exception: {0}")]
    Uncaught(String),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl SquireError {
    /// Text of the uncaught exception value, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            SquireError::Uncaught(message) => Some(message),
            SquireError::Config(_) => None,
        }
    }
}
