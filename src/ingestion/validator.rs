use super::types::*;
use crate::storage::store::ParticipantStore;
use crate::storage::types::Attendance;

use chrono::Utc;
use std::collections::HashSet;

/// Required columns missing from the first row, in canonical order.
pub fn missing_columns(rows: &[RawRow]) -> Vec<String> {
    let first = rows.first();
    REQUIRED_COLUMNS
        .iter()
        .filter(|column| first.is_none_or(|row| !row.contains_key(**column)))
        .map(|column| column.to_string())
        .collect()
}

/// Checks every row and collects all problems instead of stopping at the first.
///
/// Returns the validated drafts in sheet order, or every `RowError` found.
pub fn validate_rows(rows: &[RawRow]) -> Result<Vec<ParticipantDraft>, Vec<RowError>> {
    let mut errors = Vec::new();
    let mut drafts = Vec::with_capacity(rows.len());
    let mut seen_p_nos: HashSet<&str> = HashSet::new();
    let mut seen_mobiles: HashSet<&str> = HashSet::new();

    for (idx, row) in rows.iter().enumerate() {
        // Header is row 1
        let row_number = idx + 2;
        let errors_before = errors.len();

        let p_no = field(row, COL_P_NO);
        let mobile_no = field(row, COL_MOBILE_NO);
        let name = field(row, COL_NAME);

        for (column, value) in [(COL_P_NO, p_no), (COL_MOBILE_NO, mobile_no), (COL_NAME, name)] {
            if value.is_empty() {
                errors.push(RowError::new(row_number, format!("{} is required", column)));
            }
        }

        if !p_no.is_empty() && !seen_p_nos.insert(p_no) {
            errors.push(RowError::new(
                row_number,
                format!("Duplicate {} '{}' in file", COL_P_NO, p_no),
            ));
        }
        if !mobile_no.is_empty() && !seen_mobiles.insert(mobile_no) {
            errors.push(RowError::new(
                row_number,
                format!("Duplicate {} '{}' in file", COL_MOBILE_NO, mobile_no),
            ));
        }

        let attendance_day1 = attendance(row, COL_ATTENDANCE_DAY1, row_number, &mut errors);
        let attendance_day2 = attendance(row, COL_ATTENDANCE_DAY2, row_number, &mut errors);

        if errors.len() > errors_before {
            continue;
        }
        if let (Some(attendance_day1), Some(attendance_day2)) = (attendance_day1, attendance_day2) {
            drafts.push(ParticipantDraft {
                row: row_number,
                p_no: p_no.to_string(),
                mobile_no: mobile_no.to_string(),
                name: name.to_string(),
                trade: field(row, COL_TRADE).to_string(),
                gender: field(row, COL_GENDER).to_string(),
                attendance_day1,
                attendance_day2,
            });
        }
    }

    if errors.is_empty() {
        Ok(drafts)
    } else {
        Err(errors)
    }
}

/// Runs one ingestion batch against `store`.
///
/// The batch is all-or-nothing with respect to validation: a schema problem
/// or any row error rejects it before the store is touched. Rows whose
/// `P.No` or `Mobile No` already exist in the store are skipped and counted.
pub async fn ingest_rows(
    rows: Vec<RawRow>,
    store: &mut ParticipantStore,
) -> Result<IngestSummary, IngestError> {
    if rows.is_empty() {
        return Err(IngestError::EmptyWorkbook);
    }

    let missing = missing_columns(&rows);
    if !missing.is_empty() {
        tracing::warn!("Upload rejected, missing columns: {:?}", missing);
        return Err(IngestError::MissingColumns(missing));
    }

    let drafts = validate_rows(&rows).map_err(|errors| {
        tracing::warn!("Upload rejected with {} row errors", errors.len());
        IngestError::Validation(errors)
    })?;

    let total_rows = drafts.len();
    let created_at = Utc::now();
    let mut duplicates_skipped = 0usize;
    let mut records = Vec::with_capacity(total_rows);

    for draft in drafts {
        if store.contains_p_no(&draft.p_no) || store.contains_mobile(&draft.mobile_no) {
            tracing::debug!(
                "Row {}: skipping existing participant {} / {}",
                draft.row,
                draft.p_no,
                draft.mobile_no
            );
            duplicates_skipped += 1;
            continue;
        }
        records.push(draft.into_record(created_at));
    }

    let inserted = records.len();
    store.append(records).await?;

    tracing::info!(
        "Ingested batch: {} rows, {} inserted, {} duplicates skipped",
        total_rows,
        inserted,
        duplicates_skipped
    );

    Ok(IngestSummary {
        total_rows,
        inserted,
        duplicates_skipped,
    })
}

fn field<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(|value| value.trim()).unwrap_or_default()
}

fn attendance(
    row: &RawRow,
    column: &str,
    row_number: usize,
    errors: &mut Vec<RowError>,
) -> Option<Attendance> {
    let value = field(row, column);
    let parsed = Attendance::parse(value);
    if parsed.is_none() {
        errors.push(RowError::new(
            row_number,
            format!("{} must be 'P' or 'A' (got '{}')", column, value),
        ));
    }
    parsed
}
