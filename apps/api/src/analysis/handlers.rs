//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

/// Multipart field expected to carry the resume PDF.
pub const UPLOAD_FIELD: &str = "resume";

/// POST /api/v1/analyze
///
/// Accepts one PDF as `multipart/form-data` and returns the full analysis.
/// The field should be named `resume`; otherwise the first file field is used.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    debug!("Received resume upload ({} bytes)", upload.len());

    let result = state.analyzer.analyze(upload).await?;
    Ok(Json(result))
}

async fn read_upload(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    let mut first_file: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        let is_resume = field.name() == Some(UPLOAD_FIELD);
        let is_file = field.file_name().is_some();
        if !is_resume && (!is_file || first_file.is_some()) {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read upload", e))?;
        if is_resume {
            return Ok(data);
        }
        first_file = Some(data);
    }

    first_file.ok_or_else(|| {
        AppError::Validation(format!(
            "A PDF file is required in the '{UPLOAD_FIELD}' multipart field"
        ))
    })
}

/// Keeps axum's status for body-limit failures; everything else is a bad request.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    let message = format!("{context}: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}
