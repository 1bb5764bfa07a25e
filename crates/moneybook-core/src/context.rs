use moneybook_domain::{Group, LedgerEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::CoreError;

/// Which ledger group a computation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupContext {
    #[default]
    All,
    Group(Uuid),
}

impl GroupContext {
    /// Resolves a group title (typically the persisted current group) against
    /// the known groups. `None` selects every group.
    pub fn resolve(groups: &[Group], title: Option<&str>) -> Result<Self, CoreError> {
        let Some(title) = title.map(str::trim).filter(|title| !title.is_empty()) else {
            return Ok(GroupContext::All);
        };
        groups
            .iter()
            .find(|group| group.title == title)
            .map(|group| GroupContext::Group(group.id))
            .ok_or_else(|| CoreError::GroupNotFound(title.to_string()))
    }

    pub fn includes(&self, entry: &LedgerEntry) -> bool {
        match self {
            GroupContext::All => true,
            GroupContext::Group(id) => entry.group_id() == Some(*id),
        }
    }

    /// Entries belonging to the context, source order preserved.
    pub fn select(&self, entries: &[LedgerEntry]) -> Vec<LedgerEntry> {
        let selected: Vec<LedgerEntry> = entries
            .iter()
            .filter(|entry| self.includes(entry))
            .cloned()
            .collect();
        if selected.len() != entries.len() {
            debug!(
                "group context {:?} kept {} of {} entries",
                self,
                selected.len(),
                entries.len()
            );
        }
        selected
    }
}
