use super::spreadsheet::read_rows;
use super::types::UploadResponse;
use super::validator::ingest_rows;
use crate::error::AppError;
use crate::storage::store::SharedStore;

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::{Extension, Json};
use regex::Regex;
use std::sync::LazyLock;

/// Multipart field carrying the spreadsheet.
pub const UPLOAD_FIELD: &str = "excelFile";

const XLS_MIME: &str = "application/vnd.ms-excel";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

static EXCEL_FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.xlsx?$").expect("static regex"));

pub async fn handle_upload(
    Extension(store): Extension<SharedStore>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (file_name, bytes) = read_excel_field(&mut multipart).await?;
    tracing::info!("Received upload '{}' ({} bytes)", file_name, bytes.len());

    let rows = read_rows(&bytes)?;

    let mut store = store.write().await;
    let summary = ingest_rows(rows, &mut store).await?;

    Ok(Json(UploadResponse::from(summary)))
}

/// Accepts the upload if either its name or its declared type says Excel.
pub fn is_excel_upload(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    let by_name = file_name.is_some_and(|name| EXCEL_FILE_NAME.is_match(name));
    let by_type = content_type.is_some_and(|mime| mime == XLS_MIME || mime == XLSX_MIME);
    by_name || by_type
}

async fn read_excel_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !is_excel_upload(Some(file_name.as_str()), field.content_type()) {
            return Err(AppError::UnsupportedFileType);
        }

        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::NoFile);
        }
        return Ok((file_name, bytes));
    }

    Err(AppError::NoFile)
}
