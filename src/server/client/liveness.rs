//! Detects peers that stopped acknowledging what we write to them.

use std::time::{Duration, Instant};

/// Tracks the outstanding heartbeat ping of one connection.
#[derive(Debug, Default)]
pub struct Liveness {
    awaiting_since: Option<Instant>,
    last_ping: Option<Instant>,
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any inbound traffic proves the peer is still reading.
    pub fn seen(&mut self) {
        self.awaiting_since = None;
    }

    /// Record a ping. An older outstanding ping keeps its deadline.
    pub fn pinged(&mut self, now: Instant) {
        self.awaiting_since.get_or_insert(now);
        self.last_ping = Some(now);
    }

    /// True if no ping was sent yet, or the last one is at least `interval` old.
    pub fn ping_due(&self, now: Instant, interval: Duration) -> bool {
        self.last_ping
            .is_none_or(|last| now.saturating_duration_since(last) >= interval)
    }

    /// True once a ping has gone unanswered for `timeout`.
    pub fn is_stalled(&self, now: Instant, timeout: Duration) -> bool {
        self.awaiting_since
            .is_some_and(|since| now.saturating_duration_since(since) >= timeout)
    }
}
