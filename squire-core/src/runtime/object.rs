//! Runtime object definitions
//!
//! Callables ("journeys"), user-defined kinds and their instances.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::throw;

use super::exception::Exception;
use super::value::Value;

/// Anything that can be invoked with a slice of arguments.
///
/// The returned value is owned by the caller.
pub trait Journey {
    fn run(&self, args: &[Value]) -> Result<Value, Exception>;
}

impl<F> Journey for F
where
    F: Fn(&[Value]) -> Result<Value, Exception>,
{
    fn run(&self, args: &[Value]) -> Result<Value, Exception> {
        self(args)
    }
}

/// Function object
pub struct Function {
    /// Function name (used in text conversion and diagnostics)
    name: String,
    /// Number of parameters
    arity: usize,
    body: Box<dyn Journey>,
}

impl Function {
    /// Create a new function object
    pub fn new(name: impl Into<String>, arity: usize, body: impl Journey + 'static) -> Self {
        Self {
            name: name.into(),
            arity,
            body: Box::new(body),
        }
    }

    /// Create a function backed by a native closure
    pub fn native<F>(name: impl Into<String>, arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Exception> + 'static,
    {
        Self::new(name, arity, body)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl Journey for Function {
    fn run(&self, args: &[Value]) -> Result<Value, Exception> {
        if args.len() != self.arity {
            throw!(
                "journey '{}' takes {} argument(s), {} given",
                self.name,
                self.arity,
                args.len()
            );
        }

        self.body.run(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// A user-defined kind: a name plus an ordered list of field names
#[derive(Debug)]
pub struct Kind {
    name: String,
    fields: Vec<String>,
}

impl Kind {
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|name| name == field)
    }
}

/// An instance of a kind
#[derive(Debug)]
pub struct Instance {
    kind: Rc<Kind>,
    /// Field slots, parallel to `kind.fields`
    fields: RefCell<Vec<Value>>,
}

impl Instance {
    /// Create an instance with every field set to null
    pub fn new(kind: Rc<Kind>) -> Self {
        let fields = vec![Value::Null; kind.fields().len()];
        Self {
            kind,
            fields: RefCell::new(fields),
        }
    }

    pub fn kind(&self) -> &Rc<Kind> {
        &self.kind
    }

    pub fn fields(&self) -> Ref<'_, Vec<Value>> {
        self.fields.borrow()
    }

    /// Clone of the named field
    pub fn get_field(&self, field: &str) -> Result<Value, Exception> {
        match self.kind.field_index(field) {
            Some(index) => Ok(self.fields.borrow()[index].clone()),
            None => throw!("unknown field '{}' for '{}'", field, self.kind.name()),
        }
    }

    /// Store into the named field, returning the previous occupant
    pub fn set_field(&self, field: &str, value: Value) -> Result<Value, Exception> {
        match self.kind.field_index(field) {
            Some(index) => Ok(std::mem::replace(&mut self.fields.borrow_mut()[index], value)),
            None => throw!("unknown field '{}' for '{}'", field, self.kind.name()),
        }
    }

    /// `Kind(field: value, ...)`
    pub fn to_text(&self) -> String {
        let fields = self.fields.borrow();
        let body = self
            .kind
            .fields()
            .iter()
            .zip(fields.iter())
            .map(|(name, value)| format!("{name}: {}", value.to_text()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({body})", self.kind.name())
    }
}
