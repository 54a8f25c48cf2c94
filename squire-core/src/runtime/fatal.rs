//! Fatal internal errors
//!
//! Operand-type violations, division by zero and broken handler-stack
//! discipline are bugs in the caller, not script errors. They are logged and
//! then abort evaluation with a panic. Nothing in the runtime converts them into
//! catchable exceptions.

use std::fmt;

/// Report an internal contract violation and abort.
#[cold]
#[track_caller]
pub fn die(message: fmt::Arguments<'_>) -> ! {
    tracing::error!(target: "squire::value", %message, "fatal runtime error");
    panic!("{message}");
}

/// Format a message and abort through [`die`].
#[macro_export]
macro_rules! die {
    ($($arg:tt)*) => {
        $crate::runtime::fatal::die(format_args!($($arg)*))
    };
}
