//! Upload orchestrator: sequences one resume upload attempt.
//!
//! # State machine
//! - `Idle | Error -> Uploading` on `submit` with a selected file.
//! - `Uploading -> Success` once the file is read and the upload delay has
//!   elapsed. The file name and raw text are written to the store first.
//! - `Uploading -> Error` if the read or the store write fails. Progress
//!   resets to 0 and nothing is retried.
//! - `Success -> parsed = true` after the parse delay, unconditionally.
//! - `select_file` resets everything to `Idle` from any state and supersedes
//!   the timers and in-flight attempt of the previous selection.
//!
//! The snapshot lives in a `watch` channel so the progress ticker and parse
//! timer can update it without holding the orchestrator lock. Each attempt
//! runs on its own task, so it settles even when the caller stops waiting.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{watch, Mutex};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::SimulationConfig;
use crate::storage::{KeyValueStore, RESUME_CONTENT_KEY, RESUME_FILE_KEY};
use crate::upload::progress::{ProgressSimulator, ProgressTicker, Tick};
use crate::upload::reader::{FileReader, SelectedFile};
use crate::upload::{UploadError, UploadSnapshot, UploadStatus};

#[derive(Default)]
struct Inner {
    file: Option<SelectedFile>,
    selection: u64,
    attempt: Option<AbortHandle>,
    ticker: Option<ProgressTicker>,
    parse_timer: Option<JoinHandle<()>>,
}

impl Inner {
    /// Stops the previous selection's attempt and timers.
    fn supersede(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            attempt.abort();
        }
        self.cancel_timers();
    }

    fn cancel_timers(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        if let Some(timer) = self.parse_timer.take() {
            timer.abort();
        }
    }
}

pub struct UploadOrchestrator {
    reader: Arc<dyn FileReader>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    settings: SimulationConfig,
    state: Arc<watch::Sender<UploadSnapshot>>,
    inner: Mutex<Inner>,
}

impl UploadOrchestrator {
    pub fn new(
        reader: Arc<dyn FileReader>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        settings: SimulationConfig,
    ) -> Self {
        let (state, _) = watch::channel(UploadSnapshot::default());
        Self {
            reader,
            store,
            clock,
            settings,
            state: Arc::new(state),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn snapshot(&self) -> UploadSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadSnapshot> {
        self.state.subscribe()
    }

    /// Replaces the selected file and resets the flow to `Idle`.
    pub async fn select_file(&self, file: SelectedFile) -> UploadSnapshot {
        let mut inner = self.inner.lock().await;
        inner.supersede();
        inner.selection += 1;

        let info = file.info();
        info!(
            "Selected resume file '{}' ({} MB, {})",
            info.name, info.size_mb, info.mime_type
        );
        inner.file = Some(file);

        let selection = inner.selection;
        self.state.send_modify(|s| {
            *s = UploadSnapshot {
                file: Some(info),
                selection,
                ..UploadSnapshot::default()
            };
        });
        self.snapshot()
    }

    /// Starts one upload attempt and waits for it to settle.
    ///
    /// Returns without touching state when no file is selected, an upload is
    /// already running, or the current file was already uploaded. Dropping the
    /// returned future does not cancel the attempt; only a new selection does.
    pub async fn submit(self: &Arc<Self>) -> Result<UploadSnapshot, UploadError> {
        let attempt = {
            let mut inner = self.inner.lock().await;
            let file = inner.file.clone().ok_or(UploadError::NoFileSelected)?;
            match self.state.borrow().status {
                UploadStatus::Uploading => return Err(UploadError::AlreadyInFlight),
                UploadStatus::Success => return Err(UploadError::AlreadyUploaded),
                UploadStatus::Idle | UploadStatus::Error => {}
            }

            self.state.send_modify(|s| {
                s.status = UploadStatus::Uploading;
                s.progress = 0;
                s.parsed = false;
            });

            let selection = inner.selection;
            inner.ticker = Some(self.spawn_progress_ticker(selection));

            let this = Arc::clone(self);
            let attempt = tokio::spawn(async move { this.run_attempt(file, selection).await });
            inner.attempt = Some(attempt.abort_handle());
            attempt
        };

        match attempt.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => {
                info!("Upload superseded by a newer file selection");
                Err(UploadError::Superseded)
            }
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }

    async fn run_attempt(
        &self,
        file: SelectedFile,
        selection: u64,
    ) -> Result<UploadSnapshot, UploadError> {
        let attempt_id = Uuid::new_v4();
        info!("Upload {attempt_id} started for '{}'", file.name);

        let content = match self.reader.read_text(&file).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Upload {attempt_id} failed to read '{}': {e}", file.name);
                let inner = self.lock_current(selection).await?;
                return Err(self.fail(inner, e.into()));
            }
        };

        self.clock.sleep(self.settings.upload_delay).await;

        let mut inner = self.lock_current(selection).await?;
        if let Err(e) = self.persist(&file.name, &content).await {
            warn!("Upload {attempt_id} could not be persisted: {e}");
            return Err(self.fail(inner, e.into()));
        }

        inner.attempt = None;
        if let Some(ticker) = inner.ticker.take() {
            ticker.cancel();
        }
        self.state.send_modify(|s| {
            s.status = UploadStatus::Success;
            s.progress = 100;
            s.uploaded_at = Some(Utc::now());
        });
        inner.parse_timer = Some(self.spawn_parse_timer(selection));
        info!(
            "Upload {attempt_id} succeeded: '{}' ({} chars)",
            file.name,
            content.chars().count()
        );

        Ok(self.snapshot())
    }

    /// Locks the orchestrator, failing if a newer file has been selected since
    /// `selection` was taken.
    async fn lock_current(
        &self,
        selection: u64,
    ) -> Result<tokio::sync::MutexGuard<'_, Inner>, UploadError> {
        let inner = self.inner.lock().await;
        if inner.selection != selection {
            info!("Upload superseded by a newer file selection");
            return Err(UploadError::Superseded);
        }
        Ok(inner)
    }

    fn fail(&self, mut inner: tokio::sync::MutexGuard<'_, Inner>, err: UploadError) -> UploadError {
        inner.attempt = None;
        inner.cancel_timers();
        self.state.send_modify(|s| {
            s.status = UploadStatus::Error;
            s.progress = 0;
        });
        err
    }

    /// Name and content go out in one write so the pair never mixes uploads.
    async fn persist(&self, name: &str, content: &str) -> Result<(), crate::storage::StoreError> {
        self.store
            .set(&[(RESUME_FILE_KEY, name), (RESUME_CONTENT_KEY, content)])
            .await
    }

    fn spawn_progress_ticker(&self, selection: u64) -> ProgressTicker {
        let simulator = ProgressSimulator::new(
            self.settings.progress_step,
            self.settings.progress_cap,
        );
        let state = Arc::clone(&self.state);
        ProgressTicker::spawn(
            Arc::clone(&self.clock),
            self.settings.progress_tick,
            move || {
                let mut keep_going = true;
                state.send_if_modified(|s| {
                    if s.selection != selection || s.status != UploadStatus::Uploading {
                        keep_going = false;
                        return false;
                    }
                    match simulator.advance(s.progress) {
                        Tick::Advanced(next) => {
                            s.progress = next;
                            true
                        }
                        Tick::Capped => {
                            keep_going = false;
                            false
                        }
                    }
                });
                keep_going
            },
        )
    }

    fn spawn_parse_timer(&self, selection: u64) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let clock = Arc::clone(&self.clock);
        let delay = self.settings.parse_delay;
        tokio::spawn(async move {
            clock.sleep(delay).await;
            let flipped = state.send_if_modified(|s| {
                if s.selection == selection && s.status == UploadStatus::Success && !s.parsed {
                    s.parsed = true;
                    return true;
                }
                false
            });
            if flipped {
                info!("Resume marked as parsed");
            }
        })
    }
}
