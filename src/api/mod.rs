//! API layer
//!
//! Top-level entry points: run a body inside the outermost protected region,
//! and the script-facing book accessors that translate 1-based (and negative)
//! indices before touching storage.

use tracing::{debug, error, info, instrument};

use squire_core::runtime::exception::{self, Exception};
use squire_core::{Book, Number, Value};

use crate::core::config;

pub use error::SquireError;

mod error;

// ==================== Driver ====================

/// Run `body` inside the outermost protected region
///
/// The thread's handler stack is sized from the global configuration when it
/// has been initialized. An exception escaping `body` is reported as
/// [`SquireError::Uncaught`] carrying the text of the thrown value.
///
/// # Errors
/// Returns `SquireError::Uncaught` when `body` throws
#[instrument(target = "squire::exception", skip(body))]
pub fn run<T, F>(body: F) -> Result<T, SquireError>
where
    F: FnOnce() -> Result<T, Exception>,
{
    if config::is_initialized() {
        exception::configure(&config::config().limits);
    }

    info!(target: "squire::exception", "entering top-level region");

    match exception::protect(body) {
        Ok(result) => {
            debug!(target: "squire::exception", "top-level region completed");
            Ok(result)
        }
        Err(value) => {
            let message = value.to_text();
            error!(target: "squire::exception", error = %message, "uncaught exception");
            Err(SquireError::Uncaught(message))
        }
    }
}

// ==================== Script-level book access ====================

/// Read the page at script index `index`; null past the end
///
/// # Errors
/// Throws for index `0` and for negative indices before the first page
pub fn get_page(book: &Book, index: Number) -> Result<Value, Exception> {
    let index = book.fix_index(index)?;
    Ok(book.index(index))
}

/// Store `value` at script index `index`, growing the book as needed
///
/// # Errors
/// Throws for index `0` and for negative indices before the first page
pub fn set_page(book: &mut Book, index: Number, value: Value) -> Result<(), Exception> {
    let index = book.fix_index(index)?;
    book.index_assign(index, value);
    Ok(())
}

/// Insert `value` before script index `index`
///
/// # Errors
/// Throws for index `0` and for negative indices before the first page
pub fn insert_page(book: &mut Book, index: Number, value: Value) -> Result<(), Exception> {
    let index = book.fix_index(index)?;
    book.insert(index, value);
    Ok(())
}

/// Remove and return the page at script index `index`; null past the end
///
/// # Errors
/// Throws for index `0` and for negative indices before the first page
pub fn delete_page(book: &mut Book, index: Number) -> Result<Value, Exception> {
    let index = book.fix_index(index)?;
    Ok(book.delete(index))
}
