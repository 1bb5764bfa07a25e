use std::path::PathBuf;

use moneybook_core::GroupContext;
use moneybook_domain::Book;
use tracing::info;

use crate::cli::context::ShellContext;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::errors::{CommandError, CommandResult};

const DEFAULT_LEDGER_FILE: &str = "ledger.csv";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "load",
            "Load a ledger from a CSV export",
            "load <file.csv>",
            cmd_load,
        )
        .with_aliases(&["open"]),
        CommandEntry::new(
            "save",
            "Write the loaded ledger to CSV",
            "save [file.csv]",
            cmd_save,
        ),
        CommandEntry::new("groups", "List ledger groups", "groups", cmd_groups),
        CommandEntry::new(
            "group",
            "Show or select the current group",
            "group [title|all]",
            cmd_group,
        ),
    ]
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(path) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: load <file.csv>".into()));
    };
    let path = PathBuf::from(path);
    let mut book = Book::new();
    let report = moneybook_csv::import_path(&path, &mut book)?;
    info!(path = %path.display(), entries = report.entries, "ledger loaded");
    output::success(format!(
        "Loaded {} entries ({} groups, {} categories) from {}",
        report.entries,
        report.groups_created,
        report.categories_created,
        path.display()
    ));
    context.set_book(book, Some(path));
    Ok(())
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(path) => PathBuf::from(path),
        None => context
            .book_path
            .clone()
            .unwrap_or_else(|| context.config.resolve_data_root().join(DEFAULT_LEDGER_FILE)),
    };
    let written = moneybook_csv::export_path(context.book()?, &path)?;
    output::success(format!("Saved {written} entries to {}", path.display()));
    context.book_path = Some(path);
    Ok(())
}

fn cmd_groups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let book = context.book()?;
    if book.groups.is_empty() {
        output::info("(no groups)");
        return Ok(());
    }
    let selected = match context.group {
        GroupContext::Group(id) => Some(id),
        GroupContext::All => None,
    };
    output::section("Groups");
    for group in &book.groups {
        let entries = book
            .entries
            .iter()
            .filter(|entry| entry.group_id() == Some(group.id))
            .count();
        let categories = book.categories_of(group.id).count();
        let marker = if selected == Some(group.id) { "*" } else { " " };
        output::info(format!(
            "{marker} {:<20} {:>5} entries {:>3} categories  since {}",
            group.title,
            entries,
            categories,
            group.created.format("%Y-%m-%d")
        ));
    }
    Ok(())
}

fn cmd_group(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        output::info(format!("Current group: {}", context.group_label()));
        return Ok(());
    }
    let title = args.join(" ");
    let clear = title.eq_ignore_ascii_case("all");

    let group = if clear {
        GroupContext::All
    } else {
        GroupContext::resolve(&context.book()?.groups, Some(title.as_str()))?
    };
    context.group = group;
    context.config.current_group = (!clear).then_some(title);
    context.persist_config()?;
    output::success(format!("Current group: {}", context.group_label()));
    Ok(())
}
