//! Book - the built-in growable sequence
//!
//! Scripts address books with 1-based indices, where negative indices count
//! back from the end. [`Book::fix_index`] is the only place that translation
//! happens and the only place an index can raise. Everything else takes a
//! 0-based storage index and never throws: reads past the end yield null,
//! writes past the end grow the book and fill the gap with null.
//!
//! Ownership follows the container convention: reading yields a clone,
//! writing moves the value in, deleting moves it back out to the caller.

use std::fmt;
use std::io;

use tracing::trace;

use crate::{die, throw};

use super::codex::Codex;
use super::exception::Exception;
use super::object::Journey;
use super::value::{Number, Value};

/// Ordered, growable sequence of values
#[derive(Default)]
pub struct Book {
    pages: Vec<Value>,
}

impl Book {
    // ==================== Construction ====================

    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Empty book with room for `capacity` pages
    pub fn allocate(capacity: usize) -> Self {
        Self {
            pages: Vec::with_capacity(capacity),
        }
    }

    /// Book taking ownership of `pages`
    pub fn from_pages(pages: Vec<Value>) -> Self {
        Self { pages }
    }

    // ==================== Inspection ====================

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pages.capacity()
    }

    pub fn pages(&self) -> &[Value] {
        &self.pages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.pages.iter()
    }

    // ==================== Growth ====================

    /// Make room for `length` pages, reallocating to `length * 2 + 1`
    fn reserve(&mut self, length: usize) {
        if self.pages.capacity() <= length {
            let capacity = length * 2 + 1;
            trace!(
                target: "squire::book",
                from = self.pages.capacity(),
                to = capacity,
                "growing book"
            );
            self.pages.reserve_exact(capacity - self.pages.len());
        }
    }

    /// Grow to `length` pages, null-filling every new slot
    fn expand(&mut self, length: usize) {
        if length < self.pages.len() {
            return;
        }

        self.reserve(length);
        self.pages.resize(length, Value::Null);
    }

    // ==================== Indexing ====================

    /// Translate a script index (1-based, negative from the end) to a storage index.
    ///
    /// `0` is never a valid index. A negative index that reaches before the
    /// first page is out of bounds. Positive indices past the end are passed
    /// through; reads there yield null and writes grow the book.
    pub fn fix_index(&self, index: Number) -> Result<usize, Exception> {
        if index == 0 {
            throw!("cannot index by N.");
        }

        let mut fixed = index;
        if fixed < 0 {
            fixed += self.pages.len() as Number + 1;
        }

        if fixed <= 0 {
            throw!("index '-{}' out of bounds!", index.unsigned_abs());
        }

        Ok((fixed - 1) as usize)
    }

    /// Clone of the page at `index`, or null past the end
    pub fn index(&self, index: usize) -> Value {
        self.pages.get(index).cloned().unwrap_or(Value::Null)
    }

    /// Store `value` at `index`, growing as needed; the previous occupant is dropped
    pub fn index_assign(&mut self, index: usize, value: Value) {
        self.expand(index + 1);
        self.pages[index] = value;
    }

    /// Insert `value` at `index`, shifting later pages right.
    ///
    /// Inserting past the end null-fills up to `index` first.
    pub fn insert(&mut self, index: usize, value: Value) {
        let length = self.pages.len().max(index);
        self.reserve(length + 1);
        self.pages.resize(length, Value::Null);
        self.pages.insert(index, value);
    }

    /// Append `value` after the last page
    pub fn push(&mut self, value: Value) {
        self.reserve(self.pages.len() + 1);
        self.pages.push(value);
    }

    /// Remove and return the page at `index`, or null past the end
    pub fn delete(&mut self, index: usize) -> Value {
        if index >= self.pages.len() {
            return Value::Null;
        }

        self.pages.remove(index)
    }

    // ==================== Text ====================

    /// `[a, b, c]`
    pub fn to_text(&self) -> String {
        format!("[{}]", self.join(", "))
    }

    /// Each page's text, separated by `separator`
    pub fn join(&self, separator: &str) -> String {
        let mut text = String::new();

        for (i, page) in self.pages.iter().enumerate() {
            if i != 0 {
                text.push_str(separator);
            }
            text.push_str(&page.to_text());
        }

        text
    }

    /// Write `Book(a, b, c)` using each page's debugging representation
    pub fn dump<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "Book(")?;

        for (i, page) in self.pages.iter().enumerate() {
            if i != 0 {
                write!(out, ", ")?;
            }
            page.dump(out)?;
        }

        write!(out, ")")
    }

    // ==================== Derived books ====================

    /// `amount` copies of this book's pages, back to back
    pub fn repeat(&self, amount: usize) -> Book {
        let mut result = Book::allocate(self.pages.len() * amount);

        for _ in 0..amount {
            result.pages.extend(self.pages.iter().cloned());
        }

        result
    }

    /// Cartesian product: a two-page book `[self[i], rhs[j]]` for every `i` and `j`
    pub fn product(&self, rhs: &Book) -> Book {
        let mut result = Book::allocate(self.pages.len() * rhs.pages.len());

        for left in &self.pages {
            for right in &rhs.pages {
                let pair = Book::from_pages(vec![left.clone(), right.clone()]);
                result.pages.push(Value::book(pair));
            }
        }

        result
    }

    /// Result of running `journey` on each page, in order
    pub fn map(&self, journey: &dyn Journey) -> Result<Book, Exception> {
        let mut result = Book::allocate(self.pages.len());

        for page in &self.pages {
            result.pages.push(journey.run(std::slice::from_ref(page))?);
        }

        Ok(result)
    }

    /// Pages for which `journey` returns a truthy value
    pub fn select(&self, journey: &dyn Journey) -> Result<Book, Exception> {
        let mut result = Book::allocate(self.pages.len());

        for page in &self.pages {
            if journey.run(std::slice::from_ref(page))?.to_veracity() {
                result.pages.push(page.clone());
            }
        }

        Ok(result)
    }

    /// Left fold seeded with the first page; null for an empty book
    pub fn reduce(&self, journey: &dyn Journey) -> Result<Value, Exception> {
        let Some((first, rest)) = self.pages.split_first() else {
            return Ok(Value::Null);
        };

        let mut accumulator = first.clone();
        for page in rest {
            let args = [accumulator, page.clone()];
            accumulator = journey.run(&args)?;
        }

        Ok(accumulator)
    }

    /// Codex mapping each 1-based position to its page
    pub fn to_codex(&self) -> Codex {
        let mut codex = Codex::allocate(self.pages.len());

        for (i, page) in self.pages.iter().enumerate() {
            codex.index_assign(Value::Number(i as Number + 1), page.clone());
        }

        codex
    }
}

// ==================== Shared books ====================

impl Value {
    /// Snapshot of a book value's pages, taken without holding the borrow
    fn book_snapshot(&self, verb: &str) -> Book {
        match self {
            Value::Book(book) => Book::from_pages(book.borrow().pages.clone()),
            other => die!("cannot {} '{}'", verb, other.typename()),
        }
    }

    /// [`Book::map`] over a book value.
    ///
    /// The journey runs against a snapshot of the pages, so it may mutate the
    /// book through another owner.
    pub fn map(&self, journey: &dyn Journey) -> Result<Value, Exception> {
        Ok(Value::book(self.book_snapshot("map").map(journey)?))
    }

    /// [`Book::select`] over a snapshot of a book value
    pub fn select(&self, journey: &dyn Journey) -> Result<Value, Exception> {
        Ok(Value::book(self.book_snapshot("select").select(journey)?))
    }

    /// [`Book::reduce`] over a snapshot of a book value
    pub fn reduce(&self, journey: &dyn Journey) -> Result<Value, Exception> {
        self.book_snapshot("reduce").reduce(journey)
    }
}

impl From<Vec<Value>> for Book {
    fn from(pages: Vec<Value>) -> Self {
        Self::from_pages(pages)
    }
}

impl FromIterator<Value> for Book {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_pages(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Book {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

impl fmt::Debug for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.pages).finish()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(ns: &[Number]) -> Book {
        ns.iter().copied().map(Value::Number).collect()
    }

    #[test]
    fn test_fix_index_positive_and_negative() {
        let book = numbers(&[10, 20, 30]);
        assert_eq!(book.fix_index(1).unwrap(), 0);
        assert_eq!(book.fix_index(3).unwrap(), 2);
        assert_eq!(book.fix_index(-1).unwrap(), 2);
        assert_eq!(book.fix_index(-3).unwrap(), 0);
    }

    #[test]
    fn test_fix_index_passes_through_past_end() {
        let book = numbers(&[1]);
        assert_eq!(book.fix_index(5).unwrap(), 4);
    }

    #[test]
    fn test_fix_index_zero() {
        let err = numbers(&[1, 2]).fix_index(0).unwrap_err();
        assert_eq!(err.to_string(), "cannot index by N.");
    }

    #[test]
    fn test_fix_index_negative_out_of_bounds() {
        let book = numbers(&[1, 2, 3]);
        let err = book.fix_index(-4).unwrap_err();
        assert_eq!(err.to_string(), "index '-4' out of bounds!");
        let err = book.fix_index(-9).unwrap_err();
        assert_eq!(err.to_string(), "index '-9' out of bounds!");
    }

    #[test]
    fn test_index_past_end_is_null() {
        let book = numbers(&[1]);
        assert!(book.index(1).is_null());
        assert_eq!(book.index(0), Value::number(1));
    }

    #[test]
    fn test_index_assign_grows_with_nulls() {
        let mut book = Book::new();
        book.index_assign(3, Value::number(9));
        assert_eq!(book.len(), 4);
        assert!(book.capacity() >= 4);
        assert!(book.pages()[..3].iter().all(Value::is_null));
        assert_eq!(book.index(3), Value::number(9));
    }

    #[test]
    fn test_growth_doubles_plus_one() {
        let mut book = Book::new();
        book.index_assign(0, Value::number(1));
        assert!(book.capacity() >= 3);
    }

    #[test]
    fn test_insert_shifts_right() {
        let mut book = numbers(&[1, 2, 3]);
        book.insert(1, Value::number(9));
        assert_eq!(book.to_text(), "[1, 9, 2, 3]");
    }

    #[test]
    fn test_insert_past_end() {
        let mut book = numbers(&[1]);
        book.insert(3, Value::number(4));
        assert_eq!(book.to_text(), "[1, null, null, 4]");
    }

    #[test]
    fn test_delete() {
        let mut book = numbers(&[1, 2, 3]);
        assert_eq!(book.delete(1), Value::number(2));
        assert_eq!(book.to_text(), "[1, 3]");
        assert!(book.delete(5).is_null());
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_text() {
        let book = numbers(&[10, 20, 30]);
        assert_eq!(book.to_text(), "[10, 20, 30]");
        assert_eq!(book.join(", "), "10, 20, 30");
        assert_eq!(Book::new().to_text(), "[]");
    }

    #[test]
    fn test_dump() {
        let book = Book::from_pages(vec![Value::number(1), Value::string("a")]);
        let mut out = Vec::new();
        book.dump(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"Book(Number(1), String("a"))"#);
    }

    #[test]
    fn test_repeat() {
        assert_eq!(numbers(&[1, 2]).repeat(2).to_text(), "[1, 2, 1, 2]");
        assert!(numbers(&[1, 2]).repeat(0).is_empty());
    }

    #[test]
    fn test_product_is_cartesian() {
        let product = numbers(&[1, 2]).product(&numbers(&[3, 4, 5]));
        assert_eq!(product.len(), 6);
        assert_eq!(product.to_text(), "[[1, 3], [1, 4], [1, 5], [2, 3], [2, 4], [2, 5]]");
    }

    #[test]
    fn test_to_codex() {
        let codex = numbers(&[7, 8]).to_codex();
        assert_eq!(codex.len(), 2);
        assert_eq!(codex.index(&Value::number(1)), Value::number(7));
        assert_eq!(codex.index(&Value::number(2)), Value::number(8));
    }

    #[test]
    fn test_journey_may_grow_the_book_it_maps() {
        use crate::runtime::object::Function;

        let book = Value::book(numbers(&[1, 2]));
        let alias = book.clone();
        let journey = Function::native("grow", 1, move |args| {
            if let Some(pages) = alias.as_book() {
                pages.borrow_mut().push(args[0].clone());
            }
            Ok(args[0].mul(&Value::number(10)))
        });

        let mapped = book.map(&journey).unwrap();
        assert_eq!(mapped.to_text(), "[10, 20]");
        assert_eq!(book.to_text(), "[1, 2, 1, 2]");

        let kept = book.select(&journey).unwrap();
        assert_eq!(kept.as_book().map(|b| b.borrow().len()), Some(4));
        assert_eq!(book.as_book().map(|b| b.borrow().len()), Some(8));
    }

    #[test]
    fn test_reduce_book_value() {
        use crate::runtime::object::Function;

        let add = Function::native("add", 2, |args| Ok(args[0].add(&args[1])));
        let book = Value::book(numbers(&[1, 2, 3, 4]));
        assert_eq!(book.reduce(&add).unwrap(), Value::number(10));
    }

    #[test]
    #[should_panic(expected = "cannot map '<number>'")]
    fn test_map_requires_book_value() {
        let identity = |args: &[Value]| Ok::<_, Exception>(args[0].clone());
        let _ = Value::number(1).map(&identity);
    }

    #[test]
    fn test_reading_clones() {
        let shared = Value::string("page");
        let book = Book::from_pages(vec![shared.clone()]);
        assert_eq!(shared.refcount(), Some(2));

        let read = book.index(0);
        assert_eq!(shared.refcount(), Some(3));
        drop(read);
        drop(book);
        assert_eq!(shared.refcount(), Some(1));
    }
}
