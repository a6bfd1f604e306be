//! Axum route handlers for the job posting form.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::form::{
    skill_suggestions, submit_label, FieldUpdate, JobPostingForm, SubmissionReceipt,
};
use crate::jobs::models::JobPostingDraft;
use crate::jobs::preview::{build_preview, JobPreview};
use crate::jobs::validation::ValidationReport;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FormChangeRequest {
    #[serde(default)]
    pub draft: JobPostingDraft,
    /// Edit to apply before validating. Omit to validate the draft as-is.
    pub update: Option<FieldUpdate>,
}

#[derive(Debug, Serialize)]
pub struct FormStateResponse {
    pub draft: JobPostingDraft,
    pub report: ValidationReport,
    pub skill_suggestions: Vec<&'static str>,
    pub can_submit: bool,
    pub submitting: bool,
    pub submit_label: &'static str,
}

impl From<JobPostingForm> for FormStateResponse {
    fn from(form: JobPostingForm) -> Self {
        Self {
            skill_suggestions: skill_suggestions(&form.draft().skills),
            can_submit: form.can_submit(),
            submitting: form.is_submitting(),
            submit_label: form.submit_label(),
            report: form.report().clone(),
            draft: form.draft().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmissionState {
    pub submitting: bool,
    pub submit_label: &'static str,
}

/// POST /api/v1/jobs/validate
///
/// Applies an optional field edit and returns the revalidated form state.
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(req): Json<FormChangeRequest>,
) -> Json<FormStateResponse> {
    let mut form = JobPostingForm::from_draft(req.draft).with_pending(&state.pending_postings);
    if let Some(update) = req.update {
        form.apply(update);
    }
    Json(form.into())
}

/// POST /api/v1/jobs/preview
pub async fn handle_preview(Json(draft): Json<JobPostingDraft>) -> Json<JobPreview> {
    Json(build_preview(&draft))
}

/// POST /api/v1/jobs
///
/// Rejects invalid drafts with field errors. Valid drafts are logged, delayed,
/// and acknowledged; nothing is stored.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(draft): Json<JobPostingDraft>,
) -> Result<Json<SubmissionReceipt>, AppError> {
    let mut form = JobPostingForm::from_draft(draft);
    let receipt = form
        .submit(
            state.clock.as_ref(),
            state.config.simulation.job_submit_delay,
            &state.pending_postings,
        )
        .await
        .map_err(|report| AppError::InvalidJobPosting(report.errors))?;
    Ok(Json(receipt))
}

/// GET /api/v1/jobs/submission
///
/// Whether a posting is still inside its submit delay.
pub async fn handle_submission_status(State(state): State<AppState>) -> Json<SubmissionState> {
    let submitting = state.pending_postings.is_pending();
    Json(SubmissionState {
        submitting,
        submit_label: submit_label(submitting),
    })
}
