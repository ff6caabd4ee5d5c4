//! Admission control: per-client sliding-window rate limiting with a
//! temporary block list.
//!
//! One policy governs every rate-limited route. A client that exceeds the
//! window is blocked for a fixed duration; the denied request does not
//! consume a window slot. Blocks expire lazily on the client's next request.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// The rate-limit policy in force for the whole service.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionPolicy {
    pub max_requests: usize,
    pub window: Duration,
    pub block_duration: Duration,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AdmissionDecision {
    Allowed,
    Denied { retry_after_secs: u64 },
}

#[derive(Debug, Default)]
struct ClientRecord {
    /// Admission instants within the current window, oldest first.
    window: VecDeque<Instant>,
    blocked_until: Option<Instant>,
}

/// Process-wide admission controller keyed by client identity (IP).
///
/// The mutex covers window bookkeeping only and is never held across an
/// extraction call.
pub struct AdmissionController {
    policy: AdmissionPolicy,
    clients: Mutex<HashMap<String, ClientRecord>>,
}

impl AdmissionController {
    pub fn new(policy: AdmissionPolicy) -> Self {
        Self {
            policy,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> AdmissionPolicy {
        self.policy
    }

    /// Decide whether a request from `identity` is admitted right now.
    pub fn allow(&self, identity: &str) -> AdmissionDecision {
        self.allow_at(identity, Instant::now())
    }

    /// Clock-parameterized decision. Block check runs strictly before any
    /// window bookkeeping.
    fn allow_at(&self, identity: &str, now: Instant) -> AdmissionDecision {
        let mut clients = self
            .clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let record = clients.entry(identity.to_string()).or_default();

        if let Some(blocked_until) = record.blocked_until {
            if now < blocked_until {
                let remaining = blocked_until.duration_since(now);
                return AdmissionDecision::Denied {
                    retry_after_secs: ceil_secs(remaining),
                };
            }
            record.blocked_until = None;
        }

        let cutoff = now.checked_sub(self.policy.window);
        while let Some(&oldest) = record.window.front() {
            match cutoff {
                Some(cutoff) if oldest <= cutoff => {
                    record.window.pop_front();
                }
                _ => break,
            }
        }

        if record.window.len() >= self.policy.max_requests {
            record.blocked_until = Some(now + self.policy.block_duration);
            return AdmissionDecision::Denied {
                retry_after_secs: ceil_secs(self.policy.block_duration),
            };
        }

        record.window.push_back(now);
        AdmissionDecision::Allowed
    }

    /// Number of clients currently tracked (window or block state).
    pub fn tracked_clients(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn ceil_secs(d: Duration) -> u64 {
    let secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}
