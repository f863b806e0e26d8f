use super::types::{IngestError, RawRow};

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

/// Decodes an uploaded `.xls`/`.xlsx` file into header-keyed rows.
///
/// Only the first worksheet is read. The format is sniffed from the bytes,
/// not from the file name.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<RawRow>, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IngestError::EmptyWorkbook)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let rows = rows_from_range(&range);
    if rows.is_empty() {
        return Err(IngestError::EmptyWorkbook);
    }

    tracing::debug!("Read {} rows from sheet '{}'", rows.len(), sheet_name);
    Ok(rows)
}

/// Turns a sheet into rows keyed by the first row's header cells.
///
/// Every named column is present in every row (empty cells become `""`).
/// Columns with a blank header and rows with no content are dropped.
pub fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    let columns: Vec<Option<String>> = header
        .iter()
        .map(|cell| Some(cell_text(cell)).filter(|name| !name.is_empty()))
        .collect();

    rows.filter(|cells| cells.iter().any(|cell| !cell_text(cell).is_empty()))
        .map(|cells| {
            columns
                .iter()
                .enumerate()
                .filter_map(|(idx, column)| {
                    let name = column.as_ref()?;
                    let value = cells.get(idx).map(cell_text).unwrap_or_default();
                    Some((name.clone(), value))
                })
                .collect()
        })
        .collect()
}

/// Text form of a cell, trimmed.
///
/// Whole-number floats drop the fractional part so numeric phone numbers and
/// IDs read back the way they were typed.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}
