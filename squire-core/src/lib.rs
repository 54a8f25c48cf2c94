//! Squire Core - value representation and container runtime
//!
//! Contains the tagged runtime value, the two built-in aggregates (book and
//! codex) and the exception-handler stack used to unwind script-level errors.
//! Only operates on in-memory data structures, no file IO or terminal output.
//!
//! Limits are passed explicitly; the only ambient state is the per-thread
//! handler stack in `runtime::exception`.

pub mod runtime;

// Re-export common types
pub use runtime::book::Book;
pub use runtime::codex::{Codex, Page};
pub use runtime::exception::{Exception, ExceptionStack, HandlerId};
pub use runtime::object::{Function, Instance, Journey, Kind};
pub use runtime::value::{Number, Value};

// Re-export config types from squire-config
pub use squire_config::{Component, LimitConfig};
