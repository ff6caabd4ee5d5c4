use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::admission::AdmissionController;
use crate::cache::ResultCache;
use crate::config::Config;
use crate::parse::dispatch::Dispatcher;
use crate::store::ResultStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub admission: Arc<AdmissionController>,
    pub cache: Arc<ResultCache>,
    pub dispatcher: Arc<Dispatcher>,
    pub store: Arc<ResultStore>,
    pub stats: Arc<RequestStats>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

/// Request counters reported by `/health`. `total` counts every request
/// that reached admission control; success/failure are recorded by the
/// parse handlers.
#[derive(Debug, Default)]
pub struct RequestStats {
    total: AtomicU64,
    successful: AtomicU64,
    failed: AtomicU64,
}

impl RequestStats {
    pub fn record_request(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successful.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let total = self.total.load(Ordering::Relaxed);
        let successful = self.successful.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let success_rate = if total > 0 {
            (successful as f64 / total as f64 * 10_000.0).round() / 100.0
        } else {
            0.0
        };
        StatsSnapshot {
            total_requests: total,
            successful,
            failed,
            success_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatsSnapshot {
    pub total_requests: u64,
    pub successful: u64,
    pub failed: u64,
    /// Percentage of admitted requests that produced a parse result.
    pub success_rate: f64,
}

#[cfg(test)]
impl AppState {
    /// State with an offline model backend and a throwaway results
    /// directory, for handler and pipeline tests.
    pub(crate) async fn for_tests() -> Self {
        use std::time::Duration;

        use crate::admission::AdmissionPolicy;
        use crate::extraction::ModelBackend;

        let results_dir = std::env::temp_dir().join(format!(
            "cv-parser-tests-{}",
            uuid::Uuid::new_v4().simple()
        ));
        let store = ResultStore::open(results_dir.clone())
            .await
            .expect("opening result store");

        let config = Config {
            port: 0,
            rust_log: "info".into(),
            results_dir: results_dir.display().to_string(),
            model_base_url: "http://localhost:11434".into(),
            model_name: "llama3.1:latest".into(),
            extraction_timeout_secs: 5,
            rate_limit_max_requests: 15,
            rate_limit_window_secs: 60,
            rate_limit_block_secs: 300,
            cache_capacity: 1000,
        };

        AppState {
            admission: Arc::new(AdmissionController::new(AdmissionPolicy {
                max_requests: config.rate_limit_max_requests,
                window: Duration::from_secs(config.rate_limit_window_secs),
                block_duration: Duration::from_secs(config.rate_limit_block_secs),
            })),
            cache: Arc::new(ResultCache::new(config.cache_capacity)),
            dispatcher: Arc::new(Dispatcher::new(ModelBackend::offline())),
            store: Arc::new(store),
            stats: Arc::new(RequestStats::default()),
            started_at: Instant::now(),
            config,
        }
    }
}
