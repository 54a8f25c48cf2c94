//! Exception handling
//!
//! Script-level errors travel as `Err(Exception)` through `?` until they reach
//! the nearest enclosing protected region. Each protected region owns one
//! handler on an [`ExceptionStack`]. When an exception reaches a region, that
//! handler and every handler registered after it are discarded, the thrown
//! value is parked in the pending slot, and the region's caller resumes with
//! it. Handlers registered before the region stay live.
//!
//! The handler stack is bounded. Registering past the bound is fatal, as is
//! leaving a region while handlers registered inside it are still live.

use std::cell::RefCell;

use thiserror::Error;
use tracing::{debug, trace};

use squire_config::LimitConfig;

use crate::die;

use super::value::Value;

/// A thrown script value
#[derive(Debug, Clone, Error)]
#[error("{value}")]
pub struct Exception {
    value: Value,
}

impl Exception {
    pub fn new(value: Value) -> Self {
        debug!(target: "squire::exception", kind = value.typename(), "exception thrown");
        Self { value }
    }

    /// Exception whose value is a freshly allocated message string
    pub fn message(message: impl AsRef<str>) -> Self {
        Self::new(Value::string(message))
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl From<Value> for Exception {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Throw `value` towards the innermost live handler
pub fn throw_value<T>(value: Value) -> Result<T, Exception> {
    Err(Exception::new(value))
}

/// Format a message into a string value and throw it from the current function.
#[macro_export]
macro_rules! throw {
    ($($arg:tt)*) => {
        return ::core::result::Result::Err(::core::convert::Into::into(
            $crate::runtime::exception::Exception::message(format!($($arg)*)),
        ))
    };
}

/// Position of a handler on the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandlerId(usize);

impl HandlerId {
    pub fn depth(&self) -> usize {
        self.0
    }
}

/// Bounded stack of resumption points plus the pending-exception slot
#[derive(Debug)]
pub struct ExceptionStack {
    /// One past the top live handler
    current: usize,
    limit: usize,
    pending: Option<Value>,
}

impl ExceptionStack {
    pub fn new(limits: &LimitConfig) -> Self {
        Self::with_limit(limits.max_exception_handlers)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            current: 0,
            limit,
            pending: None,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        if limit < self.current {
            die!("cannot lower handler limit to {} with {} handlers live", limit, self.current);
        }
        self.limit = limit;
    }

    /// Number of live handlers
    pub fn depth(&self) -> usize {
        self.current
    }

    pub fn is_live(&self, handler: HandlerId) -> bool {
        handler.0 < self.current
    }

    /// Enter a protected region
    pub fn push(&mut self) -> HandlerId {
        if self.current >= self.limit {
            die!("too many nested exception handlers (limit {})", self.limit);
        }

        let handler = HandlerId(self.current);
        self.current += 1;
        trace!(target: "squire::exception", depth = self.current, "handler pushed");
        handler
    }

    /// Leave the most recent protected region normally
    pub fn pop(&mut self) -> HandlerId {
        if self.current == 0 {
            die!("exception handler stack underflow");
        }

        self.current -= 1;
        trace!(target: "squire::exception", depth = self.current, "handler popped");
        HandlerId(self.current)
    }

    /// Leave `handler`'s region normally; it must be the top live handler
    pub fn leave(&mut self, handler: HandlerId) {
        if self.current != handler.0 + 1 {
            die!(
                "unbalanced exception handlers: leaving depth {} at depth {}",
                handler.0 + 1,
                self.current
            );
        }
        self.pop();
    }

    /// Deliver `exception` to `handler`.
    ///
    /// Discards `handler` and everything above it, parks the thrown value in
    /// the pending slot and returns a new reference to it.
    pub fn unwind(&mut self, handler: HandlerId, exception: Exception) -> Value {
        if !self.is_live(handler) {
            die!("exception delivered to dead handler at depth {}", handler.0);
        }

        debug!(
            target: "squire::exception",
            from = self.current,
            to = handler.0,
            "exception caught"
        );
        self.current = handler.0;

        let value = exception.into_value();
        self.pending = Some(value.clone());
        value
    }

    /// The most recently caught exception value
    pub fn pending(&self) -> Option<&Value> {
        self.pending.as_ref()
    }

    pub fn take_pending(&mut self) -> Option<Value> {
        self.pending.take()
    }

    /// Run `body` inside a protected region.
    ///
    /// Returns the body's result, or the caught value when the body threw.
    /// Nested regions are entered by calling `catch` again on the stack passed
    /// to the body.
    pub fn catch<T, F>(&mut self, body: F) -> Result<T, Value>
    where
        F: FnOnce(&mut Self) -> Result<T, Exception>,
    {
        let handler = self.push();
        match body(self) {
            Ok(result) => {
                self.leave(handler);
                Ok(result)
            }
            Err(exception) => Err(self.unwind(handler, exception)),
        }
    }
}

impl Default for ExceptionStack {
    fn default() -> Self {
        Self::new(&LimitConfig::default())
    }
}

// ==================== Thread-wide stack ====================

thread_local! {
    static EXCEPTIONS: RefCell<ExceptionStack> = RefCell::new(ExceptionStack::default());
}

/// Apply `limits` to the interpreter stack of the current thread
pub fn configure(limits: &LimitConfig) {
    EXCEPTIONS.with(|stack| stack.borrow_mut().set_limit(limits.max_exception_handlers));
}

pub fn push_handler() -> HandlerId {
    EXCEPTIONS.with(|stack| stack.borrow_mut().push())
}

pub fn pop_handler() -> HandlerId {
    EXCEPTIONS.with(|stack| stack.borrow_mut().pop())
}

pub fn handler_depth() -> usize {
    EXCEPTIONS.with(|stack| stack.borrow().depth())
}

pub fn pending_exception() -> Option<Value> {
    EXCEPTIONS.with(|stack| stack.borrow().pending().cloned())
}

pub fn take_pending_exception() -> Option<Value> {
    EXCEPTIONS.with(|stack| stack.borrow_mut().take_pending())
}

/// Run `body` inside a protected region of the current thread's stack.
///
/// The stack is only borrowed while registering and resolving the handler, so
/// `body` may itself call `protect`.
pub fn protect<T, F>(body: F) -> Result<T, Value>
where
    F: FnOnce() -> Result<T, Exception>,
{
    let handler = push_handler();
    let result = body();

    EXCEPTIONS.with(|stack| {
        let mut stack = stack.borrow_mut();
        match result {
            Ok(result) => {
                stack.leave(handler);
                Ok(result)
            }
            Err(exception) => Err(stack.unwind(handler, exception)),
        }
    })
}
