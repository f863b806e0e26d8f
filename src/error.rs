use crate::ingestion::types::IngestError;

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Errors surfaced by the HTTP handlers.
///
/// Every variant renders as a JSON object with an `error` field; upload
/// failures add `missingColumns`, `validationErrors` or `details` as
/// appropriate.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("No file uploaded")]
    NoFile,

    #[error("Only Excel files (.xls, .xlsx) are allowed")]
    UnsupportedFileType,

    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Participant not found")]
    ParticipantNotFound,

    #[error("Route not found")]
    RouteNotFound,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Ingest(IngestError::Spreadsheet(_) | IngestError::Persistence(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Ingest(_) | AppError::NoFile | AppError::UnsupportedFileType => {
                StatusCode::BAD_REQUEST
            }
            AppError::Multipart(err) => err.status(),
            AppError::ParticipantNotFound | AppError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }

    fn body(&self) -> Value {
        match self {
            AppError::Ingest(IngestError::MissingColumns(missing)) => json!({
                "error": "Missing required columns",
                "missingColumns": missing,
            }),
            AppError::Ingest(IngestError::Validation(errors)) => json!({
                "error": "Validation failed",
                "validationErrors": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            }),
            AppError::Ingest(err @ (IngestError::Spreadsheet(_) | IngestError::Persistence(_))) => {
                json!({
                    "error": "Error processing file",
                    "details": err.to_string(),
                })
            }
            other => json!({ "error": other.to_string() }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status, self);
        }

        (status, Json(self.body())).into_response()
    }
}
