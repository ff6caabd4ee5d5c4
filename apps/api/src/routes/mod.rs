pub mod health;

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, DefaultBodyLimit, Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};

use crate::admission::AdmissionDecision;
use crate::errors::AppError;
use crate::parse::handlers;
use crate::state::AppState;

/// Multipart body limit, well above the per-file cap so the upload size
/// check owns the 413 response.
const BODY_LIMIT_BYTES: usize = 64 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/parse", post(handlers::parse_handler))
        .route("/parse-batch", post(handlers::parse_batch_handler))
        .route("/results/:request_id", get(handlers::results_handler))
        .route(
            "/supported-formats",
            get(handlers::supported_formats_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admission_middleware,
        ))
        // Banner and health stay reachable for probes even while a client
        // is blocked.
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

/// Per-client admission check keyed by peer IP.
async fn admission_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    state.stats.record_request();
    match state.admission.allow(&addr.ip().to_string()) {
        AdmissionDecision::Allowed => Ok(next.run(request).await),
        AdmissionDecision::Denied { retry_after_secs } => {
            Err(AppError::RateLimited { retry_after_secs })
        }
    }
}
