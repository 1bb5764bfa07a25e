//! Category breakdown for one month and one direction (the pie chart).

use std::{cmp::Ordering, collections::HashMap};

use moneybook_domain::{Direction, LedgerEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{assign_color, ColorSlot, ColorSource, HashedColors, Palette, Rgb};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAggregate {
    pub title: String,
    pub direction: Direction,
    /// Share of this category in the sum of all returned values; 0 when that sum is 0.
    pub ratio: f64,
    /// Magnitude of the summed amounts, never negative.
    pub value: f64,
    pub entry_count: usize,
    pub color_slot: ColorSlot,
    pub color: Rgb,
}

/// Groups one month of entries by category, keeping only `direction`.
/// Uses the default palette and title-hashed colours past it.
pub fn group_by_category(entries: &[LedgerEntry], direction: Direction) -> Vec<CategoryAggregate> {
    group_by_category_with(entries, direction, &Palette::default(), &HashedColors)
}

pub fn group_by_category_with(
    entries: &[LedgerEntry],
    direction: Direction,
    palette: &Palette,
    colors: &dyn ColorSource,
) -> Vec<CategoryAggregate> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
    let mut uncategorized = 0usize;

    for entry in entries {
        let Some(category) = entry.category.as_ref() else {
            uncategorized += 1;
            continue;
        };
        if category.direction() != direction {
            continue;
        }
        let slot = sums.entry(category.title.clone()).or_insert_with(|| {
            order.push(category.title.clone());
            (0.0, 0)
        });
        slot.0 += entry.amount;
        slot.1 += 1;
    }

    if uncategorized > 0 {
        debug!("skipped {uncategorized} entries without a category");
    }

    let mut grouped: Vec<(String, f64, usize)> = order
        .into_iter()
        .map(|title| {
            let (sum, count) = sums[&title];
            (title, sum.abs(), count)
        })
        .collect();
    grouped.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let total: f64 = grouped.iter().map(|(_, value, _)| value).sum();

    grouped
        .into_iter()
        .enumerate()
        .map(|(rank, (title, value, entry_count))| {
            let (color_slot, color) = assign_color(palette, colors, &title, rank);
            CategoryAggregate {
                ratio: if total > 0.0 { value / total } else { 0.0 },
                title,
                direction,
                value,
                entry_count,
                color_slot,
                color,
            }
        })
        .collect()
}
