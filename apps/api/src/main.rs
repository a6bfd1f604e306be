mod clock;
mod config;
mod errors;
mod jobs;
mod models;
mod routes;
mod state;
mod storage;
mod upload;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tokio::sync::watch;
use tracing::{info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::clock::TokioClock;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{KeyValueStore, MemoryStore, RedisStore};
use crate::upload::UploadSnapshot;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruit API v{}", env!("CARGO_PKG_VERSION"));

    // Upload store: Redis when configured, in-process otherwise
    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisStore::open(url)?),
        None => {
            info!("REDIS_URL not set; using in-memory upload store");
            Arc::new(MemoryStore::new())
        }
    };

    info!(
        "Simulation: upload {:?}, parse {:?}, tick {:?} (+{} up to {}%)",
        config.simulation.upload_delay,
        config.simulation.parse_delay,
        config.simulation.progress_tick,
        config.simulation.progress_step,
        config.simulation.progress_cap
    );

    let state = AppState::new(config.clone(), store, Arc::new(TokioClock));
    spawn_status_logger(state.uploads.subscribe());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front-end host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Logs every upload status transition. Progress ticks stay at trace level.
fn spawn_status_logger(mut rx: watch::Receiver<UploadSnapshot>) {
    tokio::spawn(async move {
        let mut last = rx.borrow().status;
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            if snapshot.status != last {
                info!("Upload status {:?} -> {:?}", last, snapshot.status);
                last = snapshot.status;
            } else {
                trace!("Upload progress {}% (parsed: {})", snapshot.progress, snapshot.parsed);
            }
        }
    });
}
