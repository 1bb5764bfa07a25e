//! One-call assembly of everything the monthly chart screen shows.

use moneybook_domain::{Direction, LedgerEntry, YearMonth};
use serde::{Deserialize, Serialize};

use crate::{
    category::{group_by_category_with, CategoryAggregate},
    color::{HashedColors, Palette},
    context::GroupContext,
    daily::{filter_month, group_by_day, DailyGroup},
    summary::{month_over_month_summary, MonthlySummary, PreviousTotals},
    totals::{monthly_totals, MonthlyTotals},
    trend::{statistics_by_month, RollingWindowPoint, DEFAULT_HALF_WIDTH},
};

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub half_width: usize,
    pub palette: Palette,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            half_width: DEFAULT_HALF_WIDTH,
            palette: Palette::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyReport {
    pub month: YearMonth,
    pub direction: Direction,
    pub categories: Vec<CategoryAggregate>,
    pub summary: MonthlySummary,
    /// Trend of the selected direction only.
    pub trend: Vec<RollingWindowPoint>,
    pub totals: MonthlyTotals,
    /// Timeline of the month, both directions.
    pub days: Vec<DailyGroup>,
}

impl MonthlyReport {
    pub fn build(
        entries: &[LedgerEntry],
        month: YearMonth,
        direction: Direction,
        context: GroupContext,
        options: &ReportOptions,
    ) -> Self {
        let scoped = context.select(entries);
        let current_month = filter_month(&scoped, month);
        let previous_month = filter_month(&scoped, month.previous());

        let categories =
            group_by_category_with(&current_month, direction, &options.palette, &HashedColors);
        let previous = group_by_category_with(
            &previous_month,
            direction,
            &options.palette,
            &HashedColors,
        );
        let summary =
            month_over_month_summary(&categories, &PreviousTotals::from_aggregates(&previous));

        let directional: Vec<LedgerEntry> = scoped
            .iter()
            .filter(|entry| entry.direction() == Some(direction))
            .cloned()
            .collect();

        Self {
            month,
            direction,
            categories,
            summary,
            trend: statistics_by_month(&directional, month, options.half_width),
            totals: monthly_totals(&scoped, month),
            days: group_by_day(&current_month),
        }
    }
}
