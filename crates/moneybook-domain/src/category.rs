//! Domain types representing entry categories.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classifies ledger entries; the expense flag decides the direction of every
/// entry filed under it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    pub is_expense: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
}

impl Category {
    pub fn new(title: impl Into<String>, is_expense: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            icon_name: None,
            is_expense,
            group_id: None,
        }
    }

    pub fn expense(title: impl Into<String>) -> Self {
        Self::new(title, true)
    }

    pub fn income(title: impl Into<String>) -> Self {
        Self::new(title, false)
    }

    pub fn with_group(mut self, group_id: Uuid) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn direction(&self) -> Direction {
        Direction::from_expense_flag(self.is_expense)
    }
}

/// Money flow direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Expense,
    Income,
}

impl Direction {
    pub fn from_expense_flag(is_expense: bool) -> Self {
        if is_expense {
            Direction::Expense
        } else {
            Direction::Income
        }
    }

    pub fn is_expense(self) -> bool {
        matches!(self, Direction::Expense)
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Expense => Direction::Income,
            Direction::Income => Direction::Expense,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expense" | "expenses" | "out" => Some(Direction::Expense),
            "income" | "in" => Some(Direction::Income),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Expense => "Expense",
            Direction::Income => "Income",
        };
        f.write_str(label)
    }
}
