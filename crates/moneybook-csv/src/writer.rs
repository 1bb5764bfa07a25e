use std::{fs, io::Write, path::Path};

use chrono::SecondsFormat;
use csv::WriterBuilder;
use moneybook_domain::Book;
use serde::Serialize;
use tracing::info;

use crate::{CsvError, HEADER};

#[derive(Serialize)]
struct CsvOutRow<'a> {
    group_title: &'a str,
    group_created: String,
    category_title: &'a str,
    category_is_expense: &'static str,
    title: &'a str,
    amount: f64,
    timestamp: String,
    note: &'a str,
}

/// Writes the header and one row per entry. Returns the row count. Nothing
/// is written when an entry lacks its category or group.
pub fn export<W: Write>(book: &Book, writer: W) -> Result<usize, CsvError> {
    let mut rows = Vec::with_capacity(book.entries.len());
    for entry in &book.entries {
        let missing = || CsvError::MissingRelation(entry.title.clone());
        let category = entry.category.as_ref().ok_or_else(missing)?;
        let group = category
            .group_id
            .and_then(|id| book.group(id))
            .ok_or_else(missing)?;

        rows.push(CsvOutRow {
            group_title: &group.title,
            group_created: group.created.to_rfc3339_opts(SecondsFormat::Secs, true),
            category_title: &category.title,
            category_is_expense: if category.is_expense { "1" } else { "0" },
            title: &entry.title,
            amount: entry.amount,
            timestamp: entry
                .timestamp
                .and_utc()
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            note: &entry.note,
        });
    }

    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(HEADER)?;
    for row in &rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    info!("exported {} entries", rows.len());
    Ok(rows.len())
}

pub fn export_string(book: &Book) -> Result<String, CsvError> {
    let mut buffer = Vec::new();
    export(book, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| CsvError::parse(0, err.to_string()))
}

pub fn export_path(book: &Book, path: impl AsRef<Path>) -> Result<usize, CsvError> {
    let content = export_string(book)?;
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path.as_ref(), content)?;
    info!("wrote {}", path.as_ref().display());
    Ok(book.entries.len())
}
