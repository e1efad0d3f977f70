//! Client session configuration constants.
//!
//! Buffering, liveness and inbound flood limits for a single WebSocket connection.

use std::time::Duration;

/// Number of outbound frames queued for a client before it is evicted as a slow consumer.
pub const SUBSCRIBER_BUFFER: usize = 16;

/// Time (in seconds) between two pings sent to the client.
pub const HEARTBEAT_INTERVAL_SECS: u64 = 5;

/// Time (in milliseconds) between two checks for an unanswered ping.
/// A stalled peer is dropped at most this long after its write timeout.
pub const STALL_CHECK_INTERVAL_MS: u64 = 250;

/// Time (in seconds) a client has to answer an outstanding ping before it is dropped.
pub const WRITE_TIMEOUT_SECS: u64 = 5;

/// One inbound message is accepted per interval (in milliseconds).
pub const INBOUND_INTERVAL_MS: u64 = 5;

/// Number of inbound messages accepted back to back.
pub const INBOUND_BURST: u32 = 50;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub subscriber_buffer: usize,
    pub heartbeat_interval: Duration,
    pub stall_check_interval: Duration,
    pub write_timeout: Duration,
    pub inbound_interval: Duration,
    pub inbound_burst: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            subscriber_buffer: SUBSCRIBER_BUFFER,
            heartbeat_interval: Duration::from_secs(HEARTBEAT_INTERVAL_SECS),
            stall_check_interval: Duration::from_millis(STALL_CHECK_INTERVAL_MS),
            write_timeout: Duration::from_secs(WRITE_TIMEOUT_SECS),
            inbound_interval: Duration::from_millis(INBOUND_INTERVAL_MS),
            inbound_burst: INBOUND_BURST,
        }
    }
}
