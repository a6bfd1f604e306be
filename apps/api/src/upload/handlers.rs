//! Axum route handlers for the resume upload flow.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::parsed_resume::{sample_parsed_resume, ParsedResume};
use crate::state::AppState;
use crate::upload::reader::{is_accepted_name, SelectedFile};
use crate::upload::status::{project, StatusView};
use crate::upload::UploadSnapshot;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadStateResponse {
    #[serde(flatten)]
    pub snapshot: UploadSnapshot,
    pub view: StatusView,
}

impl From<UploadSnapshot> for UploadStateResponse {
    fn from(snapshot: UploadSnapshot) -> Self {
        let view = project(snapshot.status, snapshot.parsed);
        Self { snapshot, view }
    }
}

/// POST /api/v1/resume/file
///
/// Multipart upload with a single `file` field. Selecting a file resets the
/// flow to idle.
pub async fn handle_select_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadStateResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let name = field
            .file_name()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Uploaded file has no name".to_string()))?
            .to_string();
        if !is_accepted_name(&name) {
            return Err(AppError::Validation(format!(
                "Unsupported file '{name}'. Accepted formats: PDF, DOC, DOCX"
            )));
        }
        let mime_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not receive file: {e}")))?;

        let file = SelectedFile::from_upload(name, mime_type.as_deref(), data)
            .await
            .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("Failed to stage upload")))?;

        let snapshot = state.uploads.select_file(file).await;
        return Ok(Json(snapshot.into()));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}

/// POST /api/v1/resume/upload
///
/// Runs the simulated upload for the selected file and returns once it settles.
pub async fn handle_upload(
    State(state): State<AppState>,
) -> Result<Json<UploadStateResponse>, AppError> {
    let snapshot = state.uploads.submit().await?;
    Ok(Json(snapshot.into()))
}

/// GET /api/v1/resume/status
pub async fn handle_upload_status(State(state): State<AppState>) -> Json<UploadStateResponse> {
    Json(state.uploads.snapshot().into())
}

/// GET /api/v1/resume/parsed
///
/// Available once the parsed flag is set. The payload is the sample resume,
/// not an extraction of the uploaded file.
pub async fn handle_parsed_resume(
    State(state): State<AppState>,
) -> Result<Json<ParsedResume>, AppError> {
    if !state.uploads.snapshot().parsed {
        return Err(AppError::NotFound(
            "No parsed resume available yet".to_string(),
        ));
    }
    Ok(Json(sample_parsed_resume()))
}
