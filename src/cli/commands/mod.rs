pub mod book;
pub mod calc;
pub mod config;
pub mod report;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "load",
    "save",
    "groups",
    "group",
    "month",
    "direction",
    "timeline",
    "categories",
    "trend",
    "summary",
    "category",
    "totals",
    "report",
    "calc",
    "config",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(book::definitions());
    commands.extend(report::definitions());
    commands.extend(calc::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name == *name)
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

/// Splits a trailing `--json` flag off the arguments.
pub(crate) fn json_flag<'a>(args: &[&'a str]) -> (bool, Vec<&'a str>) {
    let json = args.iter().any(|arg| *arg == "--json");
    let rest = args.iter().copied().filter(|arg| *arg != "--json").collect();
    (json, rest)
}
