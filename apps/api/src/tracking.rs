//! Request identity and stage timing.

use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

/// Generates a request id of the form `req_{8 hex chars}_{unix_ts}`.
/// The uuid fragment keeps ids unique within the same second.
pub fn generate_request_id() -> String {
    let entropy = Uuid::new_v4().simple().to_string();
    format!("req_{}_{}", &entropy[..8], Utc::now().timestamp())
}

/// Measures per-stage durations for `ProcessingMetadata`.
/// `lap()` returns the seconds since the previous lap (or construction);
/// `total()` returns the seconds since construction.
pub struct Stopwatch {
    started: Instant,
    last_lap: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_lap: now,
        }
    }

    pub fn lap(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_lap).as_secs_f64();
        self.last_lap = now;
        elapsed
    }

    pub fn total(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}
