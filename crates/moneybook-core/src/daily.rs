//! Timeline grouping: one bucket per calendar day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use moneybook_domain::{LedgerEntry, YearMonth};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyGroup {
    pub date: NaiveDate,
    /// Signed sum of the day's amounts.
    pub total_value: f64,
    pub items: Vec<LedgerEntry>,
}

/// Groups entries by calendar day, ascending. Callers filter by month and
/// direction beforehand; every input entry lands in exactly one group.
pub fn group_by_day(entries: &[LedgerEntry]) -> Vec<DailyGroup> {
    let mut days: BTreeMap<NaiveDate, DailyGroup> = BTreeMap::new();
    for entry in entries {
        let date = entry.date();
        let group = days.entry(date).or_insert_with(|| DailyGroup {
            date,
            total_value: 0.0,
            items: Vec::new(),
        });
        group.total_value += entry.amount;
        group.items.push(entry.clone());
    }
    days.into_values().collect()
}

/// Entries whose timestamp falls in `month`, source order preserved.
pub fn filter_month(entries: &[LedgerEntry], month: YearMonth) -> Vec<LedgerEntry> {
    entries
        .iter()
        .filter(|entry| month.contains(&entry.timestamp))
        .cloned()
        .collect()
}
