use moneybook_domain::{Direction, LedgerEntry, YearMonth};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Income, expense and net figures for one month (timeline footer, home widget).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTotals {
    pub month: Option<YearMonth>,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub uncategorized: usize,
}

impl MonthlyTotals {
    pub fn total(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Expense => self.expense,
            Direction::Income => self.income,
        }
    }
}

/// Splits the month's entries by category direction. Signed amounts are summed
/// per direction and then reported as magnitudes, so a refund booked under an
/// expense category lowers the expense figure instead of raising income.
pub fn monthly_totals(entries: &[LedgerEntry], month: YearMonth) -> MonthlyTotals {
    let mut income = 0.0;
    let mut expense = 0.0;
    let mut uncategorized = 0;

    for entry in entries.iter().filter(|entry| month.contains(&entry.timestamp)) {
        match entry.direction() {
            Some(Direction::Income) => income += entry.amount,
            Some(Direction::Expense) => expense += entry.amount,
            None => uncategorized += 1,
        }
    }

    if uncategorized > 0 {
        debug!("{month}: {uncategorized} entries without a category left out of totals");
    }

    let income = income.abs();
    let expense = expense.abs();
    MonthlyTotals {
        month: Some(month),
        income,
        expense,
        net: income - expense,
        uncategorized,
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
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn splits_by_category_direction() {
        let salary = Category::income("Salary");
        let food = Category::expense("Food");
        let entries = vec![
            LedgerEntry::new("Pay", 3000.0, at(4, 25)).with_category(salary),
            LedgerEntry::new("Groceries", -120.0, at(4, 3)).with_category(food.clone()),
            LedgerEntry::new("Cafe", -30.0, at(4, 9)).with_category(food.clone()),
            LedgerEntry::new("May cafe", -30.0, at(5, 1)).with_category(food),
            LedgerEntry::new("Mystery", -9.0, at(4, 10)),
        ];

        let totals = monthly_totals(&entries, YearMonth::new(2024, 4).unwrap());

        assert_eq!(totals.income, 3000.0);
        assert_eq!(totals.expense, 150.0);
        assert_eq!(totals.net, 2850.0);
        assert_eq!(totals.uncategorized, 1);
        assert_eq!(totals.total(Direction::Expense), 150.0);
    }

    #[test]
    fn empty_month_is_all_zero() {
        let totals = monthly_totals(&[], YearMonth::new(2024, 1).unwrap());
        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expense, 0.0);
        assert_eq!(totals.net, 0.0);
    }
}
