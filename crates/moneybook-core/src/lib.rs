//! moneybook-core
//!
//! Aggregation engine and amount calculator for MoneyBook.
//! Depends on moneybook-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod calculator;
pub mod category;
pub mod color;
pub mod context;
pub mod daily;
pub mod error;
pub mod report;
pub mod statistics;
pub mod summary;
pub mod time;
pub mod totals;
pub mod trend;


pub use calculator::{parse_keys, Calculator, CalculatorFault, Key, Operator, ScaledValue};
pub use category::*;
pub use color::*;
pub use context::GroupContext;
pub use daily::*;
pub use error::CoreError;
pub use report::{MonthlyReport, ReportOptions};
pub use statistics::*;
pub use summary::*;
pub use time::{Clock, SystemClock};
pub use totals::*;
pub use trend::*;
