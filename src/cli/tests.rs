use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use moneybook_config::{Config, ConfigManager};
use moneybook_core::{Clock, GroupContext};
use moneybook_domain::{Direction, YearMonth};
use tempfile::{tempdir, TempDir};

use super::context::{CliMode, LoopControl, ShellContext};
use super::shell::handle_line;
use crate::errors::CommandError;

struct MarchClock;

impl Clock for MarchClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ledger.csv")
}

fn script_context() -> (TempDir, ShellContext) {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    let context =
        ShellContext::with_config(CliMode::Script, manager, Config::default(), &MarchClock);
    (dir, context)
}

fn run(context: &mut ShellContext, line: &str) -> LoopControl {
    handle_line(context, line).unwrap_or_else(|err| panic!("`{line}` failed: {err}"))
}

fn load_fixture(context: &mut ShellContext) {
    run(context, &format!("load \"{}\"", fixture().display()));
}

#[test]
fn shell_opens_on_clock_month() {
    let (_dir, context) = script_context();
    assert_eq!(context.month, YearMonth::new(2024, 3).unwrap());
    assert_eq!(context.direction, Direction::Expense);
    assert_eq!(context.group, GroupContext::All);
}

#[test]
fn reports_need_a_loaded_book() {
    let (_dir, mut context) = script_context();
    let err = handle_line(&mut context, "categories").unwrap_err();
    assert!(matches!(err, CommandError::BookNotLoaded));
}

#[test]
fn load_then_report_commands_succeed() {
    let (_dir, mut context) = script_context();
    load_fixture(&mut context);
    let book = context.book().unwrap();
    assert_eq!(book.entries.len(), 6);
    assert_eq!(book.groups.len(), 2);

    for line in [
        "timeline",
        "categories",
        "trend",
        "summary",
        "totals --json",
        "category food",
        "report",
        "report --json",
    ] {
        assert_eq!(run(&mut context, line), LoopControl::Continue);
    }
}

#[test]
fn month_and_direction_navigation() {
    let (_dir, mut context) = script_context();
    run(&mut context, "month prev");
    assert_eq!(context.month, YearMonth::new(2024, 2).unwrap());
    run(&mut context, "month 2023-12");
    assert_eq!(context.month, YearMonth::new(2023, 12).unwrap());
    run(&mut context, "month next");
    assert_eq!(context.month, YearMonth::new(2024, 1).unwrap());
    run(&mut context, "direction income");
    assert_eq!(context.direction, Direction::Income);

    assert!(matches!(
        handle_line(&mut context, "month 2024-13"),
        Err(CommandError::InvalidArguments(_))
    ));
    assert!(matches!(
        handle_line(&mut context, "month 999999999-01"),
        Err(CommandError::InvalidArguments(_))
    ));
    assert_eq!(context.month, YearMonth::new(2024, 1).unwrap());
    assert!(matches!(
        handle_line(&mut context, "direction sideways"),
        Err(CommandError::InvalidArguments(_))
    ));
}

#[test]
fn group_selection_is_persisted() {
    let (dir, mut context) = script_context();
    load_fixture(&mut context);

    run(&mut context, "group Home");
    let home = context.book().unwrap().group_by_title("Home").unwrap().id;
    assert_eq!(context.group, GroupContext::Group(home));
    assert_eq!(context.group_label(), "Home");

    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    assert_eq!(manager.load().unwrap().current_group.as_deref(), Some("Home"));

    run(&mut context, "group all");
    assert_eq!(context.group, GroupContext::All);
    assert_eq!(manager.load().unwrap().current_group, None);

    assert!(matches!(
        handle_line(&mut context, "group Office"),
        Err(CommandError::Core(_))
    ));
}

#[test]
fn persisted_group_is_applied_on_load() {
    let dir = tempdir().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    let config = Config {
        current_group: Some("Trip".into()),
        ..Config::default()
    };
    let mut context = ShellContext::with_config(CliMode::Script, manager, config, &MarchClock);
    load_fixture(&mut context);
    assert_eq!(context.group_label(), "Trip");
    assert_eq!(context.scoped_entries().unwrap().len(), 1);
}

#[test]
fn unknown_category_is_reported() {
    let (_dir, mut context) = script_context();
    load_fixture(&mut context);
    assert!(matches!(
        handle_line(&mut context, "category salary"),
        Err(CommandError::Core(_))
    ));
    run(&mut context, "direction income");
    run(&mut context, "category salary");
}

#[test]
fn save_writes_a_reloadable_csv() {
    let (dir, mut context) = script_context();
    load_fixture(&mut context);
    let target = dir.path().join("out").join("ledger.csv");
    run(&mut context, &format!("save \"{}\"", target.display()));
    assert_eq!(context.book_path.as_deref(), Some(target.as_path()));

    let reloaded = moneybook_csv::parse_book(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(reloaded.entries.len(), 6);
    assert_eq!(reloaded.groups.len(), 2);
}

#[test]
fn config_set_updates_and_persists() {
    let (dir, mut context) = script_context();
    run(&mut context, "config set window 3");
    run(&mut context, "config set currency usd");
    assert_eq!(context.config.window_half_width, 3);
    assert_eq!(context.config.currency, "USD");

    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    assert_eq!(manager.load().unwrap().window_half_width, 3);

    assert!(matches!(
        handle_line(&mut context, "config set window 9"),
        Err(CommandError::Config(_))
    ));
    assert!(matches!(
        handle_line(&mut context, "config set"),
        Err(CommandError::InvalidArguments(_))
    ));
}

#[test]
fn calc_rejects_unknown_keys() {
    let (_dir, mut context) = script_context();
    run(&mut context, "calc 12+8*2=");
    run(&mut context, "calc 7 / 0 =");
    assert!(matches!(
        handle_line(&mut context, "calc 1 % 2"),
        Err(CommandError::Core(_))
    ));
}

#[test]
fn exit_and_unknown_commands() {
    let (_dir, mut context) = script_context();
    assert_eq!(run(&mut context, "# comment"), LoopControl::Continue);
    assert_eq!(run(&mut context, "totlas"), LoopControl::Continue);
    assert_eq!(run(&mut context, "HELP calc"), LoopControl::Continue);
    assert_eq!(run(&mut context, "quit"), LoopControl::Exit);
    assert!(!context.running);
}
