use moneybook_core::{
    category_statistics, filter_month, group_by_category_with, group_by_day,
    month_over_month_summary, monthly_totals, statistics_by_month, CategoryAggregate, HashedColors,
    MonthlyReport, PreviousTotals,
};
use moneybook_domain::{Direction, LedgerEntry, YearMonth};
use serde::Serialize;

use super::json_flag;
use crate::cli::context::ShellContext;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::cli::output;
use crate::errors::{CommandError, CommandResult};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "month",
            "Show or move the selected month",
            "month [YYYY-MM|prev|next]",
            cmd_month,
        ),
        CommandEntry::new(
            "direction",
            "Switch between expense and income charts",
            "direction <expense|income>",
            cmd_direction,
        ),
        CommandEntry::new(
            "timeline",
            "Entries of the month grouped by day",
            "timeline [--json]",
            cmd_timeline,
        ),
        CommandEntry::new(
            "categories",
            "Category breakdown of the month",
            "categories [--json]",
            cmd_categories,
        ),
        CommandEntry::new(
            "trend",
            "Monthly totals around the selected month",
            "trend [--json]",
            cmd_trend,
        ),
        CommandEntry::new(
            "summary",
            "Top category and month-over-month movers",
            "summary [--json]",
            cmd_summary,
        ),
        CommandEntry::new(
            "category",
            "Drill into one category",
            "category <title> [--json]",
            cmd_category,
        ),
        CommandEntry::new(
            "totals",
            "Income, expense and net of the month",
            "totals [--json]",
            cmd_totals,
        ),
        CommandEntry::new(
            "report",
            "Full monthly report",
            "report [--json]",
            cmd_report,
        ),
    ]
}

fn print_json<T: Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        output::info(line);
    }
}

fn heading(context: &ShellContext, title: &str) {
    output::section(format!(
        "{title} | {} | {} | {}",
        context.month,
        context.direction,
        context.group_label()
    ));
}

fn month_entries(context: &ShellContext, month: YearMonth) -> Result<Vec<LedgerEntry>, CommandError> {
    Ok(filter_month(&context.scoped_entries()?, month))
}

fn aggregates(
    context: &ShellContext,
    month: YearMonth,
) -> Result<Vec<CategoryAggregate>, CommandError> {
    let options = context.report_options();
    Ok(group_by_category_with(
        &month_entries(context, month)?,
        context.direction,
        &options.palette,
        &HashedColors,
    ))
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(arg) = args.first() {
        context.month = match arg.to_ascii_lowercase().as_str() {
            "prev" | "previous" => context.month.previous(),
            "next" => context.month.next(),
            other => other
                .parse::<YearMonth>()
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))?,
        };
    }
    output::info(format!("Month: {}", context.month));
    Ok(())
}

fn cmd_direction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        None => {}
        Some(value) if value.eq_ignore_ascii_case("toggle") => {
            context.direction = context.direction.opposite();
        }
        Some(value) => {
            context.direction = Direction::parse(value).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "unknown direction `{value}` (expected expense or income)"
                ))
            })?;
        }
    }
    output::info(format!("Direction: {}", context.direction));
    Ok(())
}

fn cmd_timeline(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (json, _) = json_flag(args);
    let days = group_by_day(&month_entries(context, context.month)?);
    if json {
        return print_json(&days);
    }
    heading(context, "Timeline");
    print_lines(render::day_lines(&days, &context.amount_format()));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (json, _) = json_flag(args);
    let categories = aggregates(context, context.month)?;
    if json {
        return print_json(&categories);
    }
    heading(context, "Categories");
    print_lines(render::category_lines(&categories, &context.amount_format()));
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (json, _) = json_flag(args);
    let direction = context.direction;
    let directional: Vec<LedgerEntry> = context
        .scoped_entries()?
        .into_iter()
        .filter(|entry| entry.direction() == Some(direction))
        .collect();
    let points = statistics_by_month(
        &directional,
        context.month,
        context.config.window_half_width,
    );
    if json {
        return print_json(&points);
    }
    heading(context, "Trend");
    print_lines(render::trend_lines(&points, &context.amount_format()));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (json, _) = json_flag(args);
    let current = aggregates(context, context.month)?;
    let previous = aggregates(context, context.month.previous())?;
    let summary = month_over_month_summary(&current, &PreviousTotals::from_aggregates(&previous));
    if json {
        return print_json(&summary);
    }
    heading(context, "Summary");
    print_lines(render::summary_lines(&summary));
    Ok(())
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (json, rest) = json_flag(args);
    if rest.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: category <title> [--json]".into(),
        ));
    }
    let title = rest.join(" ");
    let entries = context.scoped_entries()?;
    let known = entries.iter().any(|entry| {
        entry.category.as_ref().is_some_and(|category| {
            category.title == title && category.direction() == context.direction
        })
    });
    if !known {
        return Err(moneybook_core::CoreError::CategoryNotFound(title).into());
    }
    let stats = category_statistics(
        &entries,
        &title,
        context.direction,
        context.month,
        context.config.window_half_width,
    );
    if json {
        return print_json(&stats);
    }
    heading(context, "Category");
    print_lines(render::statistics_lines(&stats, &context.amount_format()));
    Ok(())
}

fn cmd_totals(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (json, _) = json_flag(args);
    let totals = monthly_totals(&context.scoped_entries()?, context.month);
    if json {
        return print_json(&totals);
    }
    heading(context, "Totals");
    print_lines(render::totals_lines(&totals, &context.amount_format()));
    Ok(())
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (json, _) = json_flag(args);
    let report = MonthlyReport::build(
        &context.book()?.entries,
        context.month,
        context.direction,
        context.group,
        &context.report_options(),
    );
    if json {
        return print_json(&report);
    }
    let money = context.amount_format();
    heading(context, "Report");
    output::section("Totals");
    print_lines(render::totals_lines(&report.totals, &money));
    output::section("Categories");
    print_lines(render::category_lines(&report.categories, &money));
    output::section("Summary");
    print_lines(render::summary_lines(&report.summary));
    output::section("Trend");
    print_lines(render::trend_lines(&report.trend, &money));
    output::section("Timeline");
    print_lines(render::day_lines(&report.days, &money));
    Ok(())
}
