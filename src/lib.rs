#![doc(test(attr(deny(warnings))))]

//! MoneyBook: a household ledger shell over the monthly aggregation engine
//! and amount calculator in `moneybook-core`.

pub mod cli;
pub mod errors;
pub mod utils;

pub use moneybook_config as config;
pub use moneybook_core as engine;
pub use moneybook_csv as csv;
pub use moneybook_domain as domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("MoneyBook tracing initialized.");
    });
}
