use std::sync::Arc;

use crate::clock::Clock;
use crate::config::Config;
use crate::jobs::form::PendingPostings;
use crate::storage::KeyValueStore;
use crate::upload::reader::TextFileReader;
use crate::upload::UploadOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// One upload flow for the whole process, like the single upload card it backs.
    pub uploads: Arc<UploadOrchestrator>,
    /// Job postings waiting out their submit delay.
    pub pending_postings: Arc<PendingPostings>,
    pub clock: Arc<dyn Clock>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let uploads = UploadOrchestrator::new(
            Arc::new(TextFileReader),
            store,
            Arc::clone(&clock),
            config.simulation.clone(),
        );
        Self {
            uploads: Arc::new(uploads),
            pending_postings: Arc::new(PendingPostings::default()),
            clock,
            config,
        }
    }
}
