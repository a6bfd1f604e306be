// Resume submission flow.
// reader: file -> text. progress: cosmetic percentage ticker.
// orchestrator: read -> delay -> persist -> success -> parsed.
// status: pure projection of the state into display variants.

pub mod handlers;
pub mod orchestrator;
pub mod progress;
pub mod reader;
pub mod status;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::storage::StoreError;
use crate::upload::reader::{FileInfo, ReadError};

pub use self::orchestrator::UploadOrchestrator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

/// Observable state of the upload flow, broadcast on every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadSnapshot {
    pub status: UploadStatus,
    /// 0-100. Cosmetic; not derived from bytes transferred.
    pub progress: u8,
    pub parsed: bool,
    pub file: Option<FileInfo>,
    pub uploaded_at: Option<DateTime<Utc>>,
    /// Bumped on every file selection. Timers from an older selection compare
    /// against it and back off.
    #[serde(skip)]
    pub(crate) selection: u64,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("An upload is already in progress")]
    AlreadyInFlight,

    #[error("This file has already been uploaded")]
    AlreadyUploaded,

    #[error("A new file was selected while the upload was in progress")]
    Superseded,

    #[error("There was an error uploading your resume: {0}")]
    Read(#[from] ReadError),

    #[error("Failed to persist uploaded resume: {0}")]
    Store(#[from] StoreError),
}
