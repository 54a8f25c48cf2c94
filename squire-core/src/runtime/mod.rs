//! Squire runtime
//!
//! Values, containers and the two error tiers: fatal internal errors
//! (`fatal`) and catchable script exceptions (`exception`).

pub mod book;
pub mod codex;
pub mod exception;
pub mod fatal;
pub mod object;
pub mod operators;
pub mod value;

pub use book::Book;
pub use codex::Codex;
pub use exception::Exception;
pub use value::Value;
