//! Runtime value representation
//!
//! `Value` is a closed sum over every type a script can hold. Scalars are
//! copied by value; heap-backed variants share their payload through `Rc`, so
//! cloning a value registers another owner and dropping it releases one. The
//! payload is freed when its last owner goes away.

use std::cell::RefCell;
use std::fmt;
use std::io;
use std::rc::Rc;

use super::book::Book;
use super::codex::Codex;
use super::object::{Function, Instance, Journey};

/// Native number type
pub type Number = i64;

/// Tagged runtime value
#[derive(Clone, Default)]
pub enum Value {
    Boolean(bool),
    /// The "no value" marker
    #[default]
    Null,
    Number(Number),
    String(Rc<str>),
    Instance(Rc<Instance>),
    Function(Rc<Function>),
    Book(Rc<RefCell<Book>>),
    Codex(Rc<RefCell<Codex>>),
}

impl Value {
    // ==================== Constants ====================

    pub const NULL: Value = Value::Null;
    pub const TRUE: Value = Value::Boolean(true);
    pub const FALSE: Value = Value::Boolean(false);

    // ==================== Constructors ====================

    #[inline]
    pub fn number(n: Number) -> Self {
        Value::Number(n)
    }

    #[inline]
    pub fn bool_from(b: bool) -> Self {
        Value::Boolean(b)
    }

    /// Allocate a new string value
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Wrap a book; the returned value is its only owner
    pub fn book(book: Book) -> Self {
        Value::Book(Rc::new(RefCell::new(book)))
    }

    /// Wrap a codex; the returned value is its only owner
    pub fn codex(codex: Codex) -> Self {
        Value::Codex(Rc::new(RefCell::new(codex)))
    }

    pub fn instance(instance: Instance) -> Self {
        Value::Instance(Rc::new(instance))
    }

    pub fn function(function: Function) -> Self {
        Value::Function(Rc::new(function))
    }

    // ==================== Type checks ====================

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Whether the value owns a heap payload
    #[inline]
    pub fn is_heap(&self) -> bool {
        !matches!(self, Value::Boolean(_) | Value::Null | Value::Number(_))
    }

    // ==================== Accessors ====================

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_book(&self) -> Option<&Rc<RefCell<Book>>> {
        match self {
            Value::Book(book) => Some(book),
            _ => None,
        }
    }

    pub fn as_codex(&self) -> Option<&Rc<RefCell<Codex>>> {
        match self {
            Value::Codex(codex) => Some(codex),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Rc<Instance>> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Borrow the value as something callable
    pub fn as_journey(&self) -> Option<&dyn Journey> {
        match self {
            Value::Function(function) => Some(&**function as &dyn Journey),
            _ => None,
        }
    }

    /// Number of live owners of the heap payload, `None` for scalars
    pub fn refcount(&self) -> Option<usize> {
        match self {
            Value::Boolean(_) | Value::Null | Value::Number(_) => None,
            Value::String(s) => Some(Rc::strong_count(s)),
            Value::Instance(i) => Some(Rc::strong_count(i)),
            Value::Function(f) => Some(Rc::strong_count(f)),
            Value::Book(b) => Some(Rc::strong_count(b)),
            Value::Codex(c) => Some(Rc::strong_count(c)),
        }
    }

    // ==================== Semantics ====================

    /// Script-visible type name; instances report their kind's name
    pub fn typename(&self) -> &str {
        match self {
            Value::Boolean(_) => "<boolean>",
            Value::Null => "<null>",
            Value::Number(_) => "<number>",
            Value::String(_) => "<string>",
            Value::Instance(instance) => instance.kind().name(),
            Value::Function(_) => "<function>",
            Value::Book(_) => "<book>",
            Value::Codex(_) => "<codex>",
        }
    }

    /// Identity: same scalar, or same heap object
    pub fn is_identical(&self, rhs: &Value) -> bool {
        match (self, rhs) {
            (Value::Boolean(l), Value::Boolean(r)) => l == r,
            (Value::Null, Value::Null) => true,
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::String(l), Value::String(r)) => Rc::ptr_eq(l, r),
            (Value::Instance(l), Value::Instance(r)) => Rc::ptr_eq(l, r),
            (Value::Function(l), Value::Function(r)) => Rc::ptr_eq(l, r),
            (Value::Book(l), Value::Book(r)) => Rc::ptr_eq(l, r),
            (Value::Codex(l), Value::Codex(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }

    /// Equality: identity, or two strings with the same bytes.
    ///
    /// Everything other than strings compares by identity only, so two
    /// distinct books or instances with identical contents are not equal.
    pub fn eql(&self, rhs: &Value) -> bool {
        if self.is_identical(rhs) {
            return true;
        }

        match (self, rhs) {
            (Value::String(l), Value::String(r)) => l.as_bytes() == r.as_bytes(),
            _ => false,
        }
    }

    /// Truthiness: false, null, zero and empty strings/books/codexes are false
    pub fn to_veracity(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Null => false,
            Value::Number(n) => *n != 0,
            Value::String(s) => !s.is_empty(),
            Value::Book(book) => !book.borrow().is_empty(),
            Value::Codex(codex) => !codex.borrow().is_empty(),
            Value::Instance(_) | Value::Function(_) => true,
        }
    }

    /// Convert to a newly allocated text
    pub fn to_text(&self) -> String {
        match self {
            Value::Boolean(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.to_string(),
            Value::Instance(instance) => instance.to_text(),
            Value::Function(function) => format!("<function {}>", function.name()),
            Value::Book(book) => book.borrow().to_text(),
            Value::Codex(codex) => codex.borrow().to_text(),
        }
    }

    /// Write a debugging representation
    pub fn dump<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Value::Boolean(b) => write!(out, "Boolean({b})"),
            Value::Null => write!(out, "Null"),
            Value::Number(n) => write!(out, "Number({n})"),
            Value::String(s) => write!(out, "String({:?})", &**s),
            Value::Instance(instance) => {
                write!(out, "Instance({}", instance.kind().name())?;
                for (name, value) in instance.kind().fields().iter().zip(instance.fields().iter()) {
                    write!(out, ", {name}=")?;
                    value.dump(out)?;
                }
                write!(out, ")")
            }
            Value::Function(function) => write!(out, "Function({}/{})", function.name(), function.arity()),
            Value::Book(book) => book.borrow().dump(out),
            Value::Codex(codex) => codex.borrow().dump(out),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eql(other)
    }
}

// ==================== Conversions ====================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<Book> for Value {
    fn from(book: Book) -> Self {
        Value::book(book)
    }
}

impl From<Codex> for Value {
    fn from(codex: Codex) -> Self {
        Value::codex(codex)
    }
}

// ==================== Debug output ====================

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Null => write!(f, "Null"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({:?})", &**s),
            Value::Instance(instance) => write!(f, "Instance({}: {:p})", instance.kind().name(), Rc::as_ptr(instance)),
            Value::Function(function) => write!(f, "Function({}: {:p})", function.name(), Rc::as_ptr(function)),
            Value::Book(book) => write!(f, "Book({:p})", Rc::as_ptr(book)),
            Value::Codex(codex) => write!(f, "Codex({:p})", Rc::as_ptr(codex)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// ==================== Tests ====================
