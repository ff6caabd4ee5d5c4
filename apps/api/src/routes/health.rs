use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Service banner with pointers to the interesting endpoints.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "cv-parser-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "parse": "POST /parse",
            "parse_batch": "POST /parse-batch",
            "results": "GET /results/{request_id}",
            "supported_formats": "GET /supported-formats",
            "health": "GET /health"
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let uptime_secs = state.started_at.elapsed().as_secs();
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "model": {
            "available": state.dispatcher.model_available(),
            "name": state.dispatcher.model_name()
        },
        "uptime_seconds": uptime_secs,
        "uptime": format_uptime(uptime_secs),
        "requests": state.stats.snapshot(),
        "cache_size": state.cache.len(),
        "stored_results": state.store.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

fn format_uptime(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours}h {minutes:02}m {seconds:02}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0h 00m 00s");
        assert_eq!(format_uptime(59), "0h 00m 59s");
        assert_eq!(format_uptime(3723), "1h 02m 03s");
        assert_eq!(format_uptime(90_061), "25h 01m 01s");
    }
}
