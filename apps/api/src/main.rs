mod admission;
mod cache;
mod config;
mod decode;
mod errors;
mod extraction;
mod models;
mod parse;
mod routes;
mod state;
mod store;
mod tracking;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::admission::{AdmissionController, AdmissionPolicy};
use crate::cache::ResultCache;
use crate::config::Config;
use crate::extraction::ModelBackend;
use crate::parse::dispatch::Dispatcher;
use crate::routes::build_router;
use crate::state::{AppState, RequestStats};
use crate::store::ResultStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; every setting has a local-dev default.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Parser API v{}", env!("CARGO_PKG_VERSION"));

    // Probe the model server once; availability is fixed for the process run.
    let model = ModelBackend::connect(
        &config.model_base_url,
        &config.model_name,
        config.extraction_timeout_secs,
    )
    .await;

    // Open the result store and rebuild its index from disk.
    let store = ResultStore::open(config.results_dir.clone()).await?;
    info!(
        "Result store ready at {} ({} records)",
        config.results_dir,
        store.len()
    );

    let admission = AdmissionController::new(AdmissionPolicy {
        max_requests: config.rate_limit_max_requests,
        window: Duration::from_secs(config.rate_limit_window_secs),
        block_duration: Duration::from_secs(config.rate_limit_block_secs),
    });
    info!(
        "Admission policy: {} requests / {}s, {}s block",
        config.rate_limit_max_requests,
        config.rate_limit_window_secs,
        config.rate_limit_block_secs
    );

    let state = AppState {
        admission: Arc::new(admission),
        cache: Arc::new(ResultCache::new(config.cache_capacity)),
        dispatcher: Arc::new(Dispatcher::new(model)),
        store: Arc::new(store),
        stats: Arc::new(RequestStats::default()),
        started_at: Instant::now(),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
