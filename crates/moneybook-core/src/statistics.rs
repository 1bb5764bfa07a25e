use moneybook_domain::{Direction, LedgerEntry, YearMonth};
use serde::{Deserialize, Serialize};

use crate::{
    daily::{filter_month, group_by_day, DailyGroup},
    trend::{statistics_by_month, RollingWindowPoint},
};

/// Drill-down for one category: its trend around the month plus the month's
/// entries grouped by day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryStatistics {
    pub title: String,
    pub direction: Direction,
    pub month: YearMonth,
    pub window: Vec<RollingWindowPoint>,
    pub total: f64,
    pub days: Vec<DailyGroup>,
}

pub fn category_statistics(
    entries: &[LedgerEntry],
    title: &str,
    direction: Direction,
    month: YearMonth,
    half_width: usize,
) -> CategoryStatistics {
    let matching: Vec<LedgerEntry> = entries
        .iter()
        .filter(|entry| {
            entry
                .category
                .as_ref()
                .is_some_and(|category| category.title == title && category.direction() == direction)
        })
        .cloned()
        .collect();

    let in_month = filter_month(&matching, month);
    let total = in_month.iter().map(|entry| entry.amount).sum::<f64>().abs();

    CategoryStatistics {
        title: title.to_string(),
        direction,
        month,
        window: statistics_by_month(&matching, month, half_width),
        total,
        days: group_by_day(&in_month),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use moneybook_domain::Category;

    fn at(month: u32, day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap()
    }

    #[test]
    fn only_the_requested_category_contributes() {
        let food = Category::expense("Food");
        let fun = Category::expense("Fun");
        let entries = vec![
            LedgerEntry::new("Lunch", -12.0, at(3, 4)).with_category(food.clone()),
            LedgerEntry::new("Dinner", -20.0, at(3, 4)).with_category(food.clone()),
            LedgerEntry::new("Snack", -3.0, at(2, 10)).with_category(food),
            LedgerEntry::new("Movie", -15.0, at(3, 5)).with_category(fun),
        ];

        let stats = category_statistics(
            &entries,
            "Food",
            Direction::Expense,
            YearMonth::new(2024, 3).unwrap(),
            2,
        );

        assert_eq!(stats.total, 32.0);
        assert_eq!(stats.days.len(), 1);
        assert_eq!(stats.days[0].items.len(), 2);
        assert_eq!(stats.window.len(), 5);
        assert_eq!(stats.window[1].value, Some(-3.0));
        assert_eq!(stats.window[2].value, Some(-32.0));
    }
}
