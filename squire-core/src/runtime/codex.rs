//! Codex - the built-in key/value association
//!
//! Pages are kept in a flat vector and searched linearly with [`Value::eql`],
//! so string keys match by content and everything else by identity. Keys are
//! unique: assigning to an existing key overwrites its value.
//!
//! Deletion swaps the last page into the freed slot, so iteration order is
//! not stable across mutation.

use std::fmt;
use std::io;

use tracing::trace;

use super::value::Value;

/// One key/value slot
#[derive(Debug, Clone)]
pub struct Page {
    pub key: Value,
    pub value: Value,
}

/// Unordered association of distinct keys to values
#[derive(Default)]
pub struct Codex {
    pages: Vec<Page>,
}

impl Codex {
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Empty codex with room for `capacity` pages
    pub fn allocate(capacity: usize) -> Self {
        Self {
            pages: Vec::with_capacity(capacity),
        }
    }

    /// Codex taking ownership of `pages`; keys must already be distinct
    pub fn from_pages(pages: Vec<Page>) -> Self {
        debug_assert!(
            pages
                .iter()
                .enumerate()
                .all(|(i, page)| pages[..i].iter().all(|prior| !prior.key.eql(&page.key))),
            "codex pages must have distinct keys"
        );
        Self { pages }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pages.capacity()
    }

    /// Pages in storage order (not stable across deletion)
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.pages.iter().map(|page| (&page.key, &page.value))
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.pages.iter().position(|page| page.key.eql(key))
    }

    /// The page whose key equals `key`
    pub fn fetch_page(&self, key: &Value) -> Option<&Page> {
        self.pages.iter().find(|page| page.key.eql(key))
    }

    pub fn fetch_page_mut(&mut self, key: &Value) -> Option<&mut Page> {
        self.pages.iter_mut().find(|page| page.key.eql(key))
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    /// Clone of the value stored under `key`, or null
    pub fn index(&self, key: &Value) -> Value {
        match self.fetch_page(key) {
            Some(page) => page.value.clone(),
            None => Value::Null,
        }
    }

    /// Store `value` under `key`, taking ownership of both.
    ///
    /// An existing page keeps its key and has its value replaced.
    pub fn index_assign(&mut self, key: Value, value: Value) {
        if let Some(page) = self.fetch_page_mut(&key) {
            page.value = value;
            return;
        }

        if self.pages.len() == self.pages.capacity() {
            let capacity = self.pages.capacity() * 2 + 1;
            trace!(
                target: "squire::codex",
                from = self.pages.capacity(),
                to = capacity,
                "growing codex"
            );
            self.pages.reserve_exact(capacity - self.pages.len());
        }

        self.pages.push(Page { key, value });
    }

    /// Remove the page under `key` and return its value, or null.
    ///
    /// The last page moves into the removed slot.
    pub fn delete(&mut self, key: &Value) -> Value {
        match self.position(key) {
            Some(index) => self.pages.swap_remove(index).value,
            None => Value::Null,
        }
    }

    /// `{k: v, ...}`
    pub fn to_text(&self) -> String {
        let mut text = String::from("{");

        for (i, page) in self.pages.iter().enumerate() {
            if i != 0 {
                text.push_str(", ");
            }
            text.push_str(&page.key.to_text());
            text.push_str(": ");
            text.push_str(&page.value.to_text());
        }

        text.push('}');
        text
    }

    /// Write `Codex(k: v, ...)` using debugging representations
    pub fn dump<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "Codex(")?;

        for (i, page) in self.pages.iter().enumerate() {
            if i != 0 {
                write!(out, ", ")?;
            }
            page.key.dump(out)?;
            write!(out, ": ")?;
            page.value.dump(out)?;
        }

        write!(out, ")")
    }
}

impl FromIterator<(Value, Value)> for Codex {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut codex = Codex::new();
        for (key, value) in iter {
            codex.index_assign(key, value);
        }
        codex
    }
}

impl fmt::Debug for Codex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Codex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
