//! The full set of records a MoneyBook session works on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::*, entry::*, group::*};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Book {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn group_by_title(&self, title: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.title == title)
    }

    /// Existing group with `title`, or a new one created at `created`.
    pub fn ensure_group(&mut self, title: &str, created: DateTime<Utc>) -> Uuid {
        if let Some(group) = self.group_by_title(title) {
            return group.id;
        }
        let group = Group::new(title, created);
        let id = group.id;
        self.groups.push(group);
        id
    }

    /// Category of `group` matching title and direction.
    pub fn find_category(&self, group_id: Uuid, title: &str, is_expense: bool) -> Option<&Category> {
        self.categories.iter().find(|category| {
            category.group_id == Some(group_id)
                && category.title == title
                && category.is_expense == is_expense
        })
    }

    pub fn ensure_category(&mut self, group_id: Uuid, title: &str, is_expense: bool) -> Category {
        if let Some(category) = self.find_category(group_id, title, is_expense) {
            return category.clone();
        }
        let category = Category::new(title, is_expense).with_group(group_id);
        self.categories.push(category.clone());
        category
    }

    pub fn categories_of(&self, group_id: Uuid) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(move |category| category.group_id == Some(group_id))
    }

    pub fn push_entry(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.categories.is_empty() && self.entries.is_empty()
    }
}
