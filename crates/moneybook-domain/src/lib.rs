//! moneybook-domain
//!
//! Pure domain models (Book, Group, Category, LedgerEntry, calendar months).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod book;
pub mod category;
pub mod common;
pub mod entry;
pub mod group;

pub use book::*;
pub use category::*;
pub use common::*;
pub use entry::*;
pub use group::*;
