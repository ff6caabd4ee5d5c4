use anyhow::{Context, Result};

/// Maximum upload size accepted per file (10 MB). Checked after the
/// multipart read so the size check owns the 413, not the body limit.
pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Maximum number of files accepted in one batch request.
pub const MAX_BATCH_SIZE: usize = 5;

/// Application configuration loaded from environment variables.
/// Every limit has a default; nothing is required for local development.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory where parsed results are persisted as JSON.
    pub results_dir: String,
    /// Base URL of the Ollama-compatible model server.
    pub model_base_url: String,
    /// Model name requested from the model server.
    pub model_name: String,
    /// Per-call extraction timeout in seconds (model backend).
    pub extraction_timeout_secs: u64,
    /// Admission policy: requests admitted per window.
    pub rate_limit_max_requests: usize,
    /// Admission policy: sliding window length in seconds.
    pub rate_limit_window_secs: u64,
    /// Admission policy: block duration after a denial, in seconds.
    pub rate_limit_block_secs: u64,
    /// Result cache capacity (entries).
    pub cache_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            results_dir: env_or("RESULTS_DIR", "Results"),
            model_base_url: env_or("MODEL_BASE_URL", "http://localhost:11434"),
            model_name: env_or("MODEL_NAME", "llama3.1:latest"),
            extraction_timeout_secs: env_or("EXTRACTION_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("EXTRACTION_TIMEOUT_SECS must be a number of seconds")?,
            rate_limit_max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", "15")
                .parse::<usize>()
                .context("RATE_LIMIT_MAX_REQUESTS must be a positive integer")?,
            rate_limit_window_secs: env_or("RATE_LIMIT_WINDOW_SECS", "60")
                .parse::<u64>()
                .context("RATE_LIMIT_WINDOW_SECS must be a number of seconds")?,
            rate_limit_block_secs: env_or("RATE_LIMIT_BLOCK_SECS", "300")
                .parse::<u64>()
                .context("RATE_LIMIT_BLOCK_SECS must be a number of seconds")?,
            cache_capacity: env_or("CACHE_CAPACITY", "1000")
                .parse::<usize>()
                .context("CACHE_CAPACITY must be a positive integer")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
