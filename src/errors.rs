use moneybook_config::ConfigError;
use moneybook_core::CoreError;
use moneybook_csv::CsvError;
use thiserror::Error;

/// Failures that stop the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor failed: {0}")]
    Editor(String),
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Editor(err.to_string())
    }
}

/// Failures of a single shell command; reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No ledger loaded. Use `load <file.csv>` first.")]
    BookNotLoaded,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Csv(#[from] CsvError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;
