//! moneybook-config
//!
//! User preferences for the MoneyBook shell: locale, currency, the current
//! ledger group, chart window and palette. Owns the Config model and its
//! JSON persistence.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
