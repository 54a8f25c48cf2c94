//! Shared helpers for squire-core integration tests

#![allow(dead_code)]

use squire_core::{Book, Exception, Function, Number, Value};

/// Route runtime logs to the test harness writer
pub fn init_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Book of number pages
pub fn numbers(ns: &[Number]) -> Book {
    ns.iter().copied().map(Value::number).collect()
}

/// Book of number pages wrapped in a value
pub fn book_value(ns: &[Number]) -> Value {
    Value::book(numbers(ns))
}

/// Two-argument journey adding its arguments
pub fn add_journey() -> Function {
    Function::native("add", 2, |args| Ok(args[0].add(&args[1])))
}

/// One-argument journey doubling a number
pub fn double_journey() -> Function {
    Function::native("double", 1, |args| Ok(args[0].mul(&Value::number(2))))
}

/// One-argument journey keeping even numbers
pub fn is_even_journey() -> Function {
    Function::native("is_even", 1, |args| {
        Ok(Value::bool_from(args[0].modulo(&Value::number(2)) == Value::number(0)))
    })
}

/// Script-level indexed read: translate then read
pub fn read_at(book: &Book, index: Number) -> Result<Value, Exception> {
    let fixed = book.fix_index(index)?;
    Ok(book.index(fixed))
}
