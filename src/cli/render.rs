//! Plain-text rendering of engine view models.

use moneybook_config::Config;
use moneybook_core::{
    CategoryAggregate, CategoryStatistics, ColorSlot, DailyGroup, MonthlySummary, MonthlyTotals,
    RollingWindowPoint, SuperlativePick,
};

/// How amounts are written: currency code plus the locale's decimal separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFormat {
    pub currency: String,
    pub decimal_separator: char,
}

impl AmountFormat {
    pub fn new(locale: &str, currency: &str) -> Self {
        let language = locale.split(['-', '_']).next().unwrap_or_default();
        let decimal_separator = match language.to_ascii_lowercase().as_str() {
            "de" | "es" | "fr" | "it" | "nl" | "pt" | "ru" => ',',
            _ => '.',
        };
        Self {
            currency: currency.to_string(),
            decimal_separator,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.locale, &config.currency)
    }

    /// Two decimals, no grouping.
    pub fn amount(&self, value: f64) -> String {
        let digits = format!("{value:.2}");
        let digits = if self.decimal_separator == '.' {
            digits
        } else {
            digits.replace('.', &self.decimal_separator.to_string())
        };
        format!("{digits} {}", self.currency)
    }
}

pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn signed_percent(changing: f64) -> String {
    format!("{:+.1}%", changing * 100.0)
}

pub fn category_lines(categories: &[CategoryAggregate], money: &AmountFormat) -> Vec<String> {
    if categories.is_empty() {
        return vec!["(no categorized entries)".to_string()];
    }
    let width = categories
        .iter()
        .map(|category| category.title.chars().count())
        .max()
        .unwrap_or(0);
    categories
        .iter()
        .enumerate()
        .map(|(rank, category)| {
            let slot = match category.color_slot {
                ColorSlot::Palette(index) => format!("p{index}"),
                ColorSlot::Generated(_) => "gen".to_string(),
            };
            format!(
                "{:>2}. {:<width$}  {:>14}  {:>6}  {} {}",
                rank + 1,
                category.title,
                money.amount(category.value),
                percent(category.ratio),
                category.color,
                slot,
            )
        })
        .collect()
}

pub fn trend_lines(points: &[RollingWindowPoint], money: &AmountFormat) -> Vec<String> {
    points
        .iter()
        .map(|point| {
            let value = point
                .value
                .map(|value| money.amount(value))
                .unwrap_or_else(|| "-".to_string());
            let marker = if point.is_current_period { " <" } else { "" };
            format!("{:>8}  {:>14}{}", point.label, value, marker)
        })
        .collect()
}

fn pick_line(label: &str, pick: &SuperlativePick) -> String {
    if pick.is_sentinel() {
        return format!("{label:<13} -");
    }
    format!(
        "{label:<13} {} ({})",
        pick.category,
        signed_percent(pick.changing)
    )
}

pub fn summary_lines(summary: &MonthlySummary) -> Vec<String> {
    vec![
        pick_line("Top category", &summary.top_category),
        pick_line("Rising star", &summary.rising_star),
        pick_line("Falling star", &summary.falling_star),
    ]
}

pub fn totals_lines(totals: &MonthlyTotals, money: &AmountFormat) -> Vec<String> {
    let mut lines = vec![
        format!("Income   {:>16}", money.amount(totals.income)),
        format!("Expense  {:>16}", money.amount(totals.expense)),
        format!("Net      {:>16}", money.amount(totals.net)),
    ];
    if totals.uncategorized > 0 {
        lines.push(format!(
            "({} entries without a category not counted)",
            totals.uncategorized
        ));
    }
    lines
}

pub fn day_lines(days: &[DailyGroup], money: &AmountFormat) -> Vec<String> {
    if days.is_empty() {
        return vec!["(no entries this month)".to_string()];
    }
    let mut lines = Vec::new();
    for day in days {
        lines.push(format!(
            "{}  total {}",
            day.date.format("%Y-%m-%d (%a)"),
            money.amount(day.total_value)
        ));
        for entry in &day.items {
            let category = entry
                .category
                .as_ref()
                .map(|category| category.title.as_str())
                .unwrap_or("?");
            let mut line = format!(
                "    {}  {:<12} {:<20} {:>14}",
                entry.timestamp.format("%H:%M"),
                category,
                entry.title,
                money.amount(entry.amount)
            );
            if !entry.note.is_empty() {
                line.push_str(&format!("  # {}", entry.note));
            }
            lines.push(line);
        }
    }
    lines
}

pub fn statistics_lines(stats: &CategoryStatistics, money: &AmountFormat) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({}) in {}: {}",
        stats.title,
        stats.direction,
        stats.month,
        money.amount(stats.total)
    )];
    lines.extend(trend_lines(&stats.window, money));
    lines.extend(day_lines(&stats.days, money));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneybook_core::{group_by_category, month_over_month_summary, PreviousTotals};
    use moneybook_domain::{Category, Direction, LedgerEntry, YearMonth};

    fn krw() -> AmountFormat {
        AmountFormat::new("ko-KR", "KRW")
    }

    fn entries() -> Vec<LedgerEntry> {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        vec![
            LedgerEntry::new("a", 15000.0, at).with_category(Category::expense("food")),
            LedgerEntry::new("b", 3000.0, at).with_category(Category::expense("transit")),
        ]
    }

    #[test]
    fn category_lines_show_value_and_share() {
        let groups = group_by_category(&entries(), Direction::Expense);
        let lines = category_lines(&groups, &krw());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("food"));
        assert!(lines[0].contains("15000.00 KRW"));
        assert!(lines[0].contains("83.3%"));
        assert!(lines[1].contains("16.7%"));
    }

    #[test]
    fn locale_picks_the_decimal_separator() {
        assert_eq!(krw().amount(1234.5), "1234.50 KRW");
        assert_eq!(AmountFormat::new("fr-FR", "EUR").amount(-2.5), "-2,50 EUR");
        assert_eq!(AmountFormat::new("en_GB", "GBP").amount(0.1), "0.10 GBP");
    }

    #[test]
    fn sentinel_picks_render_as_dash() {
        let groups = group_by_category(&entries(), Direction::Expense);
        let summary = month_over_month_summary(&groups, &PreviousTotals::new());
        let lines = summary_lines(&summary);
        assert!(lines[0].contains("food (+0.0%)"));
        assert!(lines[1].ends_with('-'));
        assert!(lines[2].ends_with('-'));
    }

    #[test]
    fn empty_trend_points_show_dash() {
        let point = RollingWindowPoint::empty(YearMonth::new(2024, 1).unwrap(), true);
        let lines = trend_lines(&[point], &krw());
        assert!(lines[0].trim_start().starts_with("2024.1"));
        assert!(lines[0].ends_with("- <"));
    }
}
