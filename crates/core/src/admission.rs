//! Sliding-window admission control for the chat endpoint.
//!
//! One window per client identity. The window is `(now - window, now]`: a
//! timestamp exactly `window` old no longer counts against the limit.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Every N admissions, drop identities whose window has fully drained.
const SWEEP_EVERY: u64 = 256;

struct WindowState {
    clients: HashMap<String, Vec<Instant>>,
    calls_since_sweep: u64,
}

pub struct AdmissionController {
    state: Mutex<WindowState>,
    limit: usize,
    window: Duration,
}

impl AdmissionController {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            state: Mutex::new(WindowState { clients: HashMap::new(), calls_since_sweep: 0 }),
            limit,
            window,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Admit or reject a request from `identity`. Never fails.
    pub fn allow(&self, identity: &str) -> bool {
        self.allow_at(identity, Instant::now())
    }

    fn allow_at(&self, identity: &str, now: Instant) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        state.calls_since_sweep += 1;
        if state.calls_since_sweep >= SWEEP_EVERY {
            state.calls_since_sweep = 0;
            sweep(&mut state.clients, now, self.window);
        }

        let timestamps = state.clients.entry(identity.to_string()).or_default();
        trim_expired(timestamps, now, self.window);

        // The trim is stored back even on rejection, so later calls for this
        // identity never rescan entries that already fell out of the window.
        if timestamps.len() >= self.limit {
            return false;
        }

        timestamps.push(now);
        true
    }
}

/// Drop every timestamp at or before `now - window`, keeping order.
fn trim_expired(timestamps: &mut Vec<Instant>, now: Instant, window: Duration) {
    timestamps.retain(|stamp| {
        now.checked_duration_since(*stamp).is_some_and(|age| age < window)
    });
}

fn sweep(clients: &mut HashMap<String, Vec<Instant>>, now: Instant, window: Duration) {
    clients.retain(|_, timestamps| {
        // Timestamps are chronological, so the last entry decides liveness.
        timestamps
            .last()
            .is_some_and(|stamp| now.checked_duration_since(*stamp).is_some_and(|age| age < window))
    });
}
