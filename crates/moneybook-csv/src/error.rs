use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("entry `{0}` has no category or group to export")]
    MissingRelation(String),
}

impl CsvError {
    pub(crate) fn parse(line: u64, message: impl Into<String>) -> Self {
        CsvError::Parse {
            line,
            message: message.into(),
        }
    }
}
