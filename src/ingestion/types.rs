//! Ingestion Data Types
//!
//! Column names, intermediate row structures, the batch summary and the error
//! taxonomy of the upload pipeline.

use crate::storage::store::StoreError;
use crate::storage::types::{Attendance, ParticipantRecord};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub const COL_P_NO: &str = "P.No";
pub const COL_MOBILE_NO: &str = "Mobile No";
pub const COL_NAME: &str = "Name";
pub const COL_TRADE: &str = "Trade";
pub const COL_GENDER: &str = "Gender";
pub const COL_ATTENDANCE_DAY1: &str = "Attendance Day 1";
pub const COL_ATTENDANCE_DAY2: &str = "Attendance Day 2";

/// Columns every uploaded sheet must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_P_NO,
    COL_MOBILE_NO,
    COL_NAME,
    COL_TRADE,
    COL_GENDER,
    COL_ATTENDANCE_DAY1,
    COL_ATTENDANCE_DAY2,
];

/// One data row of the uploaded sheet, keyed by header name.
pub type RawRow = HashMap<String, String>;

/// A row that passed validation, ready to become a `ParticipantRecord`.
///
/// `row` is the sheet row number (header is row 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantDraft {
    pub row: usize,
    pub p_no: String,
    pub mobile_no: String,
    pub name: String,
    pub trade: String,
    pub gender: String,
    pub attendance_day1: Attendance,
    pub attendance_day2: Attendance,
}

impl ParticipantDraft {
    pub fn into_record(self, created_at: DateTime<Utc>) -> ParticipantRecord {
        ParticipantRecord {
            p_no: self.p_no,
            mobile_no: self.mobile_no,
            name: self.name,
            trade: self.trade,
            gender: self.gender,
            attendance_day1: self.attendance_day1,
            attendance_day2: self.attendance_day2,
            created_at,
        }
    }
}

/// A validation failure tied to a sheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

impl RowError {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Outcome of a successful ingestion pass.
///
/// `inserted + duplicates_skipped == total_rows` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub total_rows: usize,
    pub inserted: usize,
    pub duplicates_skipped: usize,
}

/// Body returned by `POST /api/upload` on success.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub inserted_records: usize,
    pub duplicates_skipped: usize,
    pub total_rows: usize,
}

impl From<IngestSummary> for UploadResponse {
    fn from(summary: IngestSummary) -> Self {
        Self {
            message: "File uploaded successfully".to_string(),
            inserted_records: summary.inserted,
            duplicates_skipped: summary.duplicates_skipped,
            total_rows: summary.total_rows,
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("The uploaded file contains no data rows")]
    EmptyWorkbook,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Validation failed for {} row(s)", .0.len())]
    Validation(Vec<RowError>),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Failed to save participants: {0}")]
    Persistence(#[from] StoreError),
}
