//! Per-endpoint rate limit gate.
//!
//! Every response updates the endpoint's state from the
//! `x-rate-limit-remaining` / `x-rate-limit-reset` headers. Before the next
//! call, [`RateLimiter::check`] sleeps until the window resets when the
//! previous response reported no calls left. The gate is best effort: two
//! callers sharing a client can both pass the check and still hit a 429.

use crate::transport::HttpResponse;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

pub const HEADER_REMAINING: &str = "x-rate-limit-remaining";
pub const HEADER_RESET: &str = "x-rate-limit-reset";

/// Last known quota of one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitState {
    /// Calls left in the current window
    pub remaining: u32,
    /// Unix timestamp (seconds) at which the window resets
    pub reset_at: u64,
}

impl RateLimitState {
    /// Read both headers; `None` unless both are present and numeric
    pub fn from_response(response: &HttpResponse) -> Option<Self> {
        let remaining = response.header(HEADER_REMAINING)?.trim().parse().ok()?;
        let reset_at = reset_timestamp(response)?;
        Some(RateLimitState { remaining, reset_at })
    }

    /// How long to hold off before the next call, if at all
    pub fn wait_time(&self, now: SystemTime) -> Option<Duration> {
        if self.remaining > 0 {
            return None;
        }
        let wait = duration_until(self.reset_at, now);
        (!wait.is_zero()).then_some(wait)
    }
}

/// Parse `x-rate-limit-reset` as Unix seconds. Values past the range of
/// [`SystemTime`] are treated as unparsable.
pub fn reset_timestamp(response: &HttpResponse) -> Option<u64> {
    let reset_at: u64 = response.header(HEADER_RESET)?.trim().parse().ok()?;
    reset_instant(reset_at)?;
    Some(reset_at)
}

fn reset_instant(reset_at: u64) -> Option<SystemTime> {
    UNIX_EPOCH.checked_add(Duration::from_secs(reset_at))
}

/// Time left until `reset_at`, zero when it has passed or cannot be represented
pub fn duration_until(reset_at: u64, now: SystemTime) -> Duration {
    reset_instant(reset_at)
        .and_then(|reset| reset.duration_since(now).ok())
        .unwrap_or(Duration::ZERO)
}

/// Rate limit state of one client, keyed by endpoint
#[derive(Debug, Default)]
pub struct RateLimiter {
    states: Mutex<HashMap<String, RateLimitState>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `endpoint` may be called again
    pub fn check(&self, endpoint: &str) {
        let wait = self
            .state(endpoint)
            .and_then(|state| state.wait_time(SystemTime::now()));

        if let Some(wait) = wait {
            info!(
                endpoint,
                wait_ms = wait.as_millis() as u64,
                "rate limit exhausted, waiting for reset"
            );
            std::thread::sleep(wait);
        }
    }

    /// Store the quota reported by `response`. Responses without rate
    /// limit headers leave the previous state untouched.
    pub fn set(&self, endpoint: &str, response: &HttpResponse) {
        let Some(state) = RateLimitState::from_response(response) else {
            return;
        };

        debug!(
            endpoint,
            remaining = state.remaining,
            reset_at = state.reset_at,
            "rate limit updated"
        );
        let mut states = self.states.lock().unwrap_or_else(|e| e.into_inner());
        states.insert(endpoint.to_string(), state);
    }

    /// Last known state of `endpoint`
    pub fn state(&self, endpoint: &str) -> Option<RateLimitState> {
        let states = self.states.lock().unwrap_or_else(|e| e.into_inner());
        states.get(endpoint).copied()
    }
}
