use std::{fs::File, io::Read, path::Path};

use chrono::{DateTime, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use moneybook_domain::{Book, LedgerEntry};
use serde::Deserialize;
use tracing::{debug, info};

use crate::CsvError;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Columns by position; exports of older app versions spell the fourth
/// header `category_isExpese`, so header names are not trusted.
#[derive(Debug, Deserialize)]
struct CsvRow {
    group_title: String,
    group_created: String,
    category_title: String,
    category_is_expense: String,
    title: String,
    amount: String,
    timestamp: String,
    note: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub entries: usize,
    pub groups_created: usize,
    pub categories_created: usize,
}

/// Appends every row of `reader` to `book`, reusing groups by title and
/// categories by `(group, title, direction)`. The book is untouched when any
/// row fails.
pub fn import<R: Read>(reader: R, book: &mut Book) -> Result<ImportReport, CsvError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut staged = book.clone();
    let mut report = ImportReport::default();

    let mut record = StringRecord::new();
    while rdr.read_record(&mut record)? {
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        let row: CsvRow = record
            .deserialize(None)
            .map_err(|err| CsvError::parse(line, err.to_string()))?;

        let groups_before = staged.groups.len();
        let group_id = match staged.group_by_title(&row.group_title) {
            Some(group) => group.id,
            None => {
                let created = parse_timestamp(&row.group_created)
                    .map(|ts| ts.and_utc())
                    .ok_or_else(|| {
                        CsvError::parse(line, format!("invalid group_created `{}`", row.group_created))
                    })?;
                staged.ensure_group(&row.group_title, created)
            }
        };
        report.groups_created += staged.groups.len() - groups_before;

        let is_expense = parse_flag(&row.category_is_expense).ok_or_else(|| {
            CsvError::parse(
                line,
                format!("invalid category_isExpense `{}`", row.category_is_expense),
            )
        })?;
        let categories_before = staged.categories.len();
        let category = staged.ensure_category(group_id, &row.category_title, is_expense);
        report.categories_created += staged.categories.len() - categories_before;

        let amount: f64 = row
            .amount
            .trim()
            .parse()
            .map_err(|_| CsvError::parse(line, format!("invalid amount `{}`", row.amount)))?;
        let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| {
            CsvError::parse(line, format!("invalid timestamp `{}`", row.timestamp))
        })?;

        staged.push_entry(
            LedgerEntry::new(row.title, amount, timestamp)
                .with_note(row.note)
                .with_category(category),
        );
        report.entries += 1;
        debug!("line {line}: imported entry");
    }

    *book = staged;
    info!(
        "imported {} entries ({} new groups, {} new categories)",
        report.entries, report.groups_created, report.categories_created
    );
    Ok(report)
}

pub fn import_str(content: &str, book: &mut Book) -> Result<ImportReport, CsvError> {
    import(content.as_bytes(), book)
}

pub fn import_path(path: impl AsRef<Path>, book: &mut Book) -> Result<ImportReport, CsvError> {
    let file = File::open(path.as_ref())?;
    info!("importing {}", path.as_ref().display());
    import(file, book)
}

/// Reads RFC 3339 as UTC wall time; offset-less timestamps are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc).naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// `1`/`0`, also `true`/`false`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
