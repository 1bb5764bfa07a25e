//! Shared runtime state for shell commands.

use std::path::PathBuf;

use dialoguer::Confirm;
use moneybook_config::{Config, ConfigManager};
use moneybook_core::{Clock, GroupContext, Palette, ReportOptions, SystemClock};
use moneybook_domain::{Book, Direction, LedgerEntry, YearMonth};
use strsim::levenshtein;
use tracing::debug;

use super::{commands, output, registry::CommandRegistry, render::AmountFormat};
use crate::errors::{CliError, CommandError};

/// Overrides the directory holding `config/config.json`.
pub const HOME_ENV: &str = "MONEYBOOK_HOME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub book: Option<Book>,
    pub book_path: Option<PathBuf>,
    pub month: YearMonth,
    pub direction: Direction,
    pub group: GroupContext,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = std::env::var_os(HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(ConfigManager::default_base_dir);
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        Ok(Self::with_config(mode, config_manager, config, &SystemClock))
    }

    pub fn with_config(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        clock: &dyn Clock,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

        Self {
            mode,
            registry,
            config_manager,
            config,
            book: None,
            book_path: None,
            month: clock.current_month(),
            direction: Direction::Expense,
            group: GroupContext::All,
            running: true,
        }
    }

    pub fn book(&self) -> Result<&Book, CommandError> {
        self.book.as_ref().ok_or(CommandError::BookNotLoaded)
    }

    /// Installs a freshly loaded book and re-resolves the persisted group.
    pub fn set_book(&mut self, book: Book, path: Option<PathBuf>) {
        let title = self.config.current_group.clone();
        self.group = match GroupContext::resolve(&book.groups, title.as_deref()) {
            Ok(group) => group,
            Err(err) => {
                output::warning(format!("{err}; showing all groups"));
                GroupContext::All
            }
        };
        self.book = Some(book);
        self.book_path = path;
    }

    /// Entries of the selected group, all months.
    pub fn scoped_entries(&self) -> Result<Vec<LedgerEntry>, CommandError> {
        Ok(self.group.select(&self.book()?.entries))
    }

    pub fn report_options(&self) -> ReportOptions {
        let palette = Palette::from_hex(&self.config.palette).unwrap_or_else(|err| {
            output::warning(format!("{err}; using the default palette"));
            Palette::default()
        });
        ReportOptions {
            half_width: self.config.window_half_width,
            palette,
        }
    }

    pub fn amount_format(&self) -> AmountFormat {
        AmountFormat::from_config(&self.config)
    }

    pub fn group_label(&self) -> String {
        match (self.group, self.book.as_ref()) {
            (GroupContext::Group(id), Some(book)) => book
                .group(id)
                .map(|group| group.title.clone())
                .unwrap_or_else(|| "?".to_string()),
            _ => "all groups".to_string(),
        }
    }

    pub fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        debug!("config saved to {}", self.config_manager.config_path().display());
        Ok(())
    }

    pub fn prompt(&self) -> String {
        format!(
            "moneybook [{} {} | {}]> ",
            self.month,
            self.direction,
            self.group_label()
        )
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("did you mean `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt("Exit MoneyBook?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Editor(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("use `help <command>` for usage details");
            }
            other => output::error(other),
        }
    }
}
