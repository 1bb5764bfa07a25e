//! Month-over-month superlatives shown next to the category chart.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::CategoryAggregate;

pub const SENTINEL_TITLE: &str = "-";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuperlativePick {
    pub category: String,
    /// Relative change against the previous month, e.g. `0.5` for +50%.
    pub changing: f64,
}

impl SuperlativePick {
    pub fn sentinel() -> Self {
        Self {
            category: SENTINEL_TITLE.to_string(),
            changing: 0.0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.category == SENTINEL_TITLE
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub top_category: SuperlativePick,
    pub rising_star: SuperlativePick,
    pub falling_star: SuperlativePick,
}

impl MonthlySummary {
    pub fn empty() -> Self {
        Self {
            top_category: SuperlativePick::sentinel(),
            rising_star: SuperlativePick::sentinel(),
            falling_star: SuperlativePick::sentinel(),
        }
    }
}

/// Previous-month category values keyed by category title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviousTotals {
    values: HashMap<String, f64>,
}

impl PreviousTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_aggregates(aggregates: &[CategoryAggregate]) -> Self {
        Self {
            values: aggregates
                .iter()
                .map(|aggregate| (aggregate.title.clone(), aggregate.value))
                .collect(),
        }
    }

    pub fn insert(&mut self, title: impl Into<String>, value: f64) {
        self.values.insert(title.into(), value);
    }

    /// A usable comparison base: present and non-zero.
    pub fn base(&self, title: &str) -> Option<f64> {
        self.values
            .get(title)
            .copied()
            .filter(|value| *value != 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Picks the largest category, the fastest riser and the biggest faller.
/// The three picks are independent; one category may win several.
pub fn month_over_month_summary(
    current: &[CategoryAggregate],
    previous: &PreviousTotals,
) -> MonthlySummary {
    let mut top: Option<&CategoryAggregate> = None;
    for aggregate in current {
        if top.map_or(true, |best| aggregate.value > best.value) {
            top = Some(aggregate);
        }
    }
    let Some(top) = top else {
        return MonthlySummary::empty();
    };

    let top_category = SuperlativePick {
        category: top.title.clone(),
        changing: previous
            .base(&top.title)
            .map(|base| top.value / base - 1.0)
            .unwrap_or(0.0),
    };

    let mut rising: Option<(&str, f64)> = None;
    let mut falling: Option<(&str, f64)> = None;
    for aggregate in current {
        let Some(base) = previous.base(&aggregate.title) else {
            continue;
        };
        let ratio = aggregate.value / base;
        if rising.map_or(true, |(_, best)| ratio > best) {
            rising = Some((aggregate.title.as_str(), ratio));
        }
        if falling.map_or(true, |(_, worst)| ratio < worst) {
            falling = Some((aggregate.title.as_str(), ratio));
        }
    }

    let pick = |candidate: Option<(&str, f64)>| {
        candidate
            .map(|(title, ratio)| SuperlativePick {
                category: title.to_string(),
                changing: ratio - 1.0,
            })
            .unwrap_or_else(SuperlativePick::sentinel)
    };

    MonthlySummary {
        top_category,
        rising_star: pick(rising),
        falling_star: pick(falling),
    }
}
