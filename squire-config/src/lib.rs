//! Squire Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Squire crates.

use serde::{Deserialize, Serialize};

/// Default bound on live exception handlers.
pub const DEFAULT_MAX_EXCEPTION_HANDLERS: usize = 2048;

/// Configuration for runtime limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum number of simultaneously live exception handlers
    pub max_exception_handlers: usize,
}

/// Runtime component, used to route log output per subsystem
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Value,
    Book,
    Codex,
    Exception,
}

impl Component {
    /// All components, in declaration order
    pub const ALL: [Component; 4] = [
        Component::Value,
        Component::Book,
        Component::Codex,
        Component::Exception,
    ];

    /// Get the string name of the component
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Value => "value",
            Component::Book => "book",
            Component::Codex => "codex",
            Component::Exception => "exception",
        }
    }

    /// Get the log target name for this component
    pub fn target(&self) -> String {
        format!("squire::{}", self.as_str())
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_exception_handlers: DEFAULT_MAX_EXCEPTION_HANDLERS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit_config() {
        let cfg = LimitConfig::default();
        assert_eq!(cfg.max_exception_handlers, 2048);
    }

    #[test]
    fn test_component_as_str() {
        assert_eq!(Component::Book.as_str(), "book");
        assert_eq!(Component::Exception.target(), "squire::exception");
    }

    #[test]
    fn test_limit_config_from_json() {
        let cfg: LimitConfig = serde_json::from_str(r#"{"max_exception_handlers": 16}"#).unwrap();
        assert_eq!(cfg.max_exception_handlers, 16);

        let cfg: LimitConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, LimitConfig::default());
    }

    #[test]
    fn test_component_serde_names() {
        let json = serde_json::to_string(&Component::Codex).unwrap();
        assert_eq!(json, r#""codex""#);
        let back: Component = serde_json::from_str(r#""value""#).unwrap();
        assert_eq!(back, Component::Value);
    }
}
