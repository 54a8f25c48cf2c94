//! Book behaviour through the public API

mod common;

use common::{add_journey, double_journey, init_test_logger, is_even_journey, numbers, read_at};
use squire_core::{Book, Exception, Function, Journey, Value};

#[test]
fn test_fix_index_bounds() {
    let book = numbers(&[10, 20, 30, 40]);
    let len = book.len() as i64;

    assert_eq!(book.fix_index(1).unwrap(), 0);
    assert_eq!(book.fix_index(len).unwrap(), 3);
    assert_eq!(book.fix_index(-1).unwrap(), 3);
    assert_eq!(book.fix_index(-len).unwrap(), 0);

    assert_eq!(book.fix_index(0).unwrap_err().to_string(), "cannot index by N.");
    assert_eq!(
        book.fix_index(-(len + 1)).unwrap_err().to_string(),
        "index '-5' out of bounds!"
    );
}

#[test]
fn test_script_read_through_fix_index() {
    let book = numbers(&[10, 20, 30]);
    assert_eq!(read_at(&book, -1).unwrap(), Value::number(30));
    assert!(read_at(&book, 7).unwrap().is_null());
    assert!(read_at(&book, 0).is_err());
}

#[test]
fn test_growth_fills_gap_with_null() {
    init_test_logger();

    let mut book = Book::new();
    book.index_assign(4, Value::string("end"));
    assert!(book.len() >= 5);
    assert!(book.capacity() >= book.len());
    assert!(book.pages()[..4].iter().all(Value::is_null));

    let mut inserted = Book::new();
    inserted.insert(2, Value::number(1));
    assert_eq!(inserted.len(), 3);
    assert_eq!(inserted.to_text(), "[null, null, 1]");
}

#[test]
fn test_push_and_iterate() {
    let mut book = Book::new();
    for n in 1..=5 {
        book.push(Value::number(n));
    }
    let total: i64 = book.iter().filter_map(Value::as_number).sum();
    assert_eq!(total, 15);
}

#[test]
fn test_delete_transfers_ownership_out() {
    let shared = Value::string("page");
    let mut book = Book::from_pages(vec![shared.clone(), Value::number(2)]);
    assert_eq!(shared.refcount(), Some(2));

    let removed = book.delete(0);
    assert_eq!(book.len(), 1);
    assert_eq!(shared.refcount(), Some(2));

    drop(removed);
    assert_eq!(shared.refcount(), Some(1));
}

#[test]
fn test_dropping_book_releases_pages() {
    let shared = Value::string("page");
    let book = Value::book(Book::from_pages(vec![shared.clone(), shared.clone()]));
    assert_eq!(shared.refcount(), Some(3));

    let alias = book.clone();
    drop(book);
    assert_eq!(shared.refcount(), Some(3));

    drop(alias);
    assert_eq!(shared.refcount(), Some(1));
}

#[test]
fn test_text_conversions() {
    let book = numbers(&[10, 20, 30]);
    assert_eq!(book.to_text(), "[10, 20, 30]");
    assert_eq!(book.join(", "), "10, 20, 30");
    assert_eq!(book.join("-"), "10-20-30");
    assert_eq!(format!("{}", Value::book(book)), "[10, 20, 30]");
}

#[test]
fn test_repeat() {
    assert_eq!(numbers(&[1, 2]).repeat(2).to_text(), "[1, 2, 1, 2]");
}

#[test]
fn test_product_of_unequal_lengths() {
    let product = numbers(&[1, 2, 3]).product(&numbers(&[9]));
    assert_eq!(product.to_text(), "[[1, 9], [2, 9], [3, 9]]");
    assert!(numbers(&[1]).product(&Book::new()).is_empty());
}

#[test]
fn test_map_select_reduce() {
    let book = numbers(&[1, 2, 3, 4]);

    assert_eq!(book.map(&double_journey()).unwrap().to_text(), "[2, 4, 6, 8]");
    assert_eq!(book.select(&is_even_journey()).unwrap().to_text(), "[2, 4]");
    assert_eq!(book.reduce(&add_journey()).unwrap(), Value::number(10));
    assert!(Book::new().reduce(&add_journey()).unwrap().is_null());
    assert_eq!(numbers(&[7]).reduce(&add_journey()).unwrap(), Value::number(7));
}

#[test]
fn test_map_with_function_value() {
    let double = Value::function(double_journey());
    let journey = double.as_journey().unwrap();
    let mapped = numbers(&[5]).map(journey).unwrap();
    assert_eq!(mapped.index(0), Value::number(10));
}

#[test]
fn test_journey_exception_stops_map() {
    let failing = Function::native("fail", 1, |args| {
        if args[0] == Value::number(2) {
            squire_core::throw!("bad page {}", args[0]);
        }
        Ok(args[0].clone())
    });

    let err = numbers(&[1, 2, 3]).map(&failing).unwrap_err();
    assert_eq!(err.to_string(), "bad page 2");
}

#[test]
fn test_reduce_with_wrong_arity_journey() {
    let err = numbers(&[1, 2]).reduce(&double_journey()).unwrap_err();
    assert_eq!(err.to_string(), "journey 'double' takes 1 argument(s), 2 given");
}

#[test]
fn test_closure_as_journey() {
    let offset = 100;
    let shift = move |args: &[Value]| Ok::<_, Exception>(args[0].add(&Value::number(offset)));
    let shifted = numbers(&[1, 2]).map(&shift).unwrap();
    assert_eq!(shifted.to_text(), "[101, 102]");
    assert_eq!(shift.run(&[Value::number(0)]).unwrap(), Value::number(100));
}

#[test]
fn test_to_codex() {
    let codex = numbers(&[5, 6, 7]).to_codex();
    assert_eq!(codex.len(), 3);
    assert_eq!(codex.index(&Value::number(3)), Value::number(7));
    assert!(codex.index(&Value::number(0)).is_null());
}
