//! CSV ingestion

use crate::{Error, Result, Row};
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};

/// Read a headered CSV file into rows
#[instrument]
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let file = std::fs::File::open(path)?;
    let rows = read_rows_from(file)?;
    debug!(rows = rows.len(), "CSV loaded");
    Ok(rows)
}

/// Read headered CSV data from any reader.
///
/// Header order is preserved in each row. Input without data rows is
/// rejected with [`Error::EmptyInput`].
pub fn read_rows_from<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let rows = reader
        .records()
        .map(|record| -> Result<Row> {
            let record = record?;
            Ok(headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect())
        })
        .collect::<Result<Vec<Row>>>()?;

    if rows.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(rows)
}

/// Fail if any row lacks one of the given columns
pub fn ensure_columns(rows: &[Row], columns: &[&str]) -> Result<()> {
    for (index, row) in rows.iter().enumerate() {
        if let Some(column) = columns.iter().find(|c| row.get(c).is_none()) {
            return Err(Error::MissingColumn {
                column: column.to_string(),
                row: index,
            });
        }
    }
    Ok(())
}
