//! Ledger entries: single income or expense records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::*, common::*};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub note: String,
    /// Signed amount. The sign is informational; direction comes from the category.
    pub amount: f64,
    pub timestamp: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl LedgerEntry {
    pub fn new(title: impl Into<String>, amount: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            note: String::new(),
            amount,
            timestamp,
            category: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(&self.timestamp)
    }

    /// `None` while the entry has no resolved category.
    pub fn direction(&self) -> Option<Direction> {
        self.category.as_ref().map(Category::direction)
    }

    pub fn group_id(&self) -> Option<Uuid> {
        self.category.as_ref().and_then(|category| category.group_id)
    }

}
