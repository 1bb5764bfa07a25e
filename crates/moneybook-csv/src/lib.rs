//! moneybook-csv
//!
//! Flat CSV import/export of a [`Book`]: one row per entry, carrying the
//! entry's group and category inline.
//!
//! ```text
//! group_title,group_created,category_title,category_isExpense,title,amount,timestamp,note
//! ```

pub mod error;
mod reader;
mod writer;

pub use error::CsvError;
pub use reader::{import, import_path, import_str, parse_flag, parse_timestamp, ImportReport};
pub use writer::{export, export_path, export_string};

use moneybook_domain::Book;

pub const HEADER: [&str; 8] = [
    "group_title",
    "group_created",
    "category_title",
    "category_isExpense",
    "title",
    "amount",
    "timestamp",
    "note",
];

/// Builds a fresh book from CSV text.
pub fn parse_book(content: &str) -> Result<Book, CsvError> {
    let mut book = Book::new();
    import_str(content, &mut book)?;
    Ok(book)
}
