//! Value operators (negation, comparison, arithmetic)
//!
//! Each operator accepts a fixed set of operand types. Any other pairing is
//! a bug in the code that emitted the operation and aborts through `die!`.
//! It is never reported as a script exception.

use std::cmp::Ordering;

use crate::die;

use super::value::{Number, Value};

impl Value {
    /// Logical negation; only booleans can be negated
    pub fn not(&self) -> bool {
        match self {
            Value::Boolean(b) => !b,
            other => die!("cannot logically negate '{}'", other.typename()),
        }
    }

    /// Number/number or string/string ordering (strings compare bytewise)
    fn ordering(&self, rhs: &Value) -> Ordering {
        match (self, rhs) {
            (Value::Number(l), Value::Number(r)) => l.cmp(r),
            (Value::String(l), Value::String(r)) => l.as_bytes().cmp(r.as_bytes()),
            _ => die!("cannot compare '{}' with '{}'", self.typename(), rhs.typename()),
        }
    }

    pub fn lth(&self, rhs: &Value) -> bool {
        self.ordering(rhs) == Ordering::Less
    }

    pub fn gth(&self, rhs: &Value) -> bool {
        self.ordering(rhs) == Ordering::Greater
    }

    /// Numeric sum or string concatenation
    pub fn add(&self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Number(l), Value::Number(r)) => Value::Number(l.wrapping_add(*r)),
            (Value::String(l), Value::String(r)) => {
                let mut result = String::with_capacity(l.len() + r.len());
                result.push_str(l);
                result.push_str(r);
                Value::from(result)
            }
            _ => die!("cannot add '{}' to '{}'", self.typename(), rhs.typename()),
        }
    }

    pub fn sub(&self, rhs: &Value) -> Value {
        let (l, r) = self.numbers(rhs, "subtract");
        Value::Number(l.wrapping_sub(r))
    }

    /// Numeric product, or a string repeated `floor(rhs)` times
    pub fn mul(&self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Number(l), Value::Number(r)) => Value::Number(l.wrapping_mul(*r)),
            (Value::String(l), Value::Number(r)) => {
                // non-positive counts yield the empty string
                let count = usize::try_from(*r).unwrap_or(0);
                Value::from(l.repeat(count))
            }
            _ => die!("cannot multiply '{}' by '{}'", self.typename(), rhs.typename()),
        }
    }

    pub fn div(&self, rhs: &Value) -> Value {
        let (l, r) = self.numbers(rhs, "divide");
        if r == 0 {
            die!("cannot divide by zero");
        }
        Value::Number(l.wrapping_div(r))
    }

    pub fn modulo(&self, rhs: &Value) -> Value {
        let (l, r) = self.numbers(rhs, "modulo");
        if r == 0 {
            die!("cannot modulo by zero");
        }
        Value::Number(l.wrapping_rem(r))
    }

    fn numbers(&self, rhs: &Value, verb: &str) -> (Number, Number) {
        match (self, rhs) {
            (Value::Number(l), Value::Number(r)) => (*l, *r),
            _ => die!("cannot {} '{}' and '{}'", verb, self.typename(), rhs.typename()),
        }
    }
}
