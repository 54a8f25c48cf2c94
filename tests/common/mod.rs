//! Test helpers
//!
//! Shared set-up for end-to-end tests of the squire crate.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use squire::{Book, Config, Function, Number, Value};

static SETUP: OnceCell<()> = OnceCell::new();

/// Initialize the global configuration once per test binary
pub fn setup() {
    SETUP.get_or_init(|| squire::init(Config::default()));
}

/// Book of number pages
pub fn numbers(ns: &[Number]) -> Book {
    ns.iter().copied().map(Value::number).collect()
}

/// Two-argument journey adding its arguments
pub fn add_journey() -> Function {
    Function::native("add", 2, |args| Ok(args[0].add(&args[1])))
}
