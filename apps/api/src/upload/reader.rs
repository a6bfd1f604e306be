//! Reads a selected resume file into memory as text.
//!
//! PDF, DOC and DOCX are not parsed: every format is read as raw text, and
//! bytes that are not valid UTF-8 come through as replacement characters.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use tempfile::{NamedTempFile, TempPath};
use thiserror::Error;

/// Extensions the upload form accepts, lowercase, without the dot.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Uploads larger than this are parked on disk until the next selection.
pub const SPILL_THRESHOLD: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Error reading file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file content")]
    Empty,
}

/// Where the file's bytes live.
#[derive(Debug, Clone)]
pub enum FileSource {
    Memory(Bytes),
    /// Removed from disk when the last clone is dropped.
    Disk(Arc<TempPath>),
}

/// A user-chosen file. Owned by the orchestrator until the next selection.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub source: FileSource,
}

/// The metadata half of a `SelectedFile`, safe to expose in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub size_mb: String,
    pub mime_type: String,
}

impl SelectedFile {
    /// Builds a file from uploaded bytes. An empty or missing MIME type is
    /// inferred from the file extension.
    pub fn from_bytes(name: impl Into<String>, mime_type: Option<&str>, data: Bytes) -> Self {
        let name = name.into();
        let mime_type = match mime_type {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ => mime_type_for(&name).to_string(),
        };
        Self {
            size: data.len() as u64,
            name,
            mime_type,
            source: FileSource::Memory(data),
        }
    }

    /// Like `from_bytes`, but content above `SPILL_THRESHOLD` is written to a
    /// temporary file instead of being held in memory.
    pub async fn from_upload(
        name: impl Into<String>,
        mime_type: Option<&str>,
        data: Bytes,
    ) -> std::io::Result<Self> {
        let mut file = Self::from_bytes(name, mime_type, Bytes::new());
        file.size = data.len() as u64;
        if data.len() <= SPILL_THRESHOLD {
            file.source = FileSource::Memory(data);
            return Ok(file);
        }

        let temp = tokio::task::spawn_blocking(move || -> std::io::Result<TempPath> {
            let mut tmp = NamedTempFile::new()?;
            tmp.write_all(&data)?;
            tmp.flush()?;
            Ok(tmp.into_temp_path())
        })
        .await
        .map_err(std::io::Error::other)??;

        file.source = FileSource::Disk(Arc::new(temp));
        Ok(file)
    }

    pub fn info(&self) -> FileInfo {
        FileInfo {
            name: self.name.clone(),
            size: self.size,
            size_mb: format_size_mb(self.size),
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Lowercased extension of a file name, if any.
fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Checked on the name alone, before any bytes are staged.
pub fn is_accepted_name(name: &str) -> bool {
    extension_of(name).is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
}

fn mime_type_for(name: &str) -> &'static str {
    match extension_of(name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Size in megabytes with two decimals, e.g. `1.00`.
pub fn format_size_mb(size: u64) -> String {
    format!("{:.2}", size as f64 / 1024.0 / 1024.0)
}

/// Produces a file's contents as text. Succeeds or fails exactly once.
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_text(&self, file: &SelectedFile) -> Result<String, ReadError>;
}

/// Reads every format as raw text with lossy UTF-8 decoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFileReader;

#[async_trait]
impl FileReader for TextFileReader {
    async fn read_text(&self, file: &SelectedFile) -> Result<String, ReadError> {
        let text = match &file.source {
            FileSource::Memory(data) => String::from_utf8_lossy(data).into_owned(),
            FileSource::Disk(path) => {
                let data = tokio::fs::read(path.to_path_buf()).await?;
                String::from_utf8_lossy(&data).into_owned()
            }
        };
        if text.is_empty() {
            return Err(ReadError::Empty);
        }
        Ok(text)
    }
}
