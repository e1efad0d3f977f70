//! Hub configuration constants.
//!
//! This module defines the broadcast cadence of every hub and the rate limit
//! applied to publishes triggered outside the periodic tick.

use std::time::Duration;

/// Period between two position snapshots (in milliseconds).
pub const TICK_INTERVAL_MS: u64 = 50;

/// The main lobby broadcasts its room summary instead of positions every N ticks.
pub const ROOM_SUMMARY_EVERY: u64 = 100;

/// One externally triggered publish is allowed per interval (in milliseconds).
pub const PUBLISH_INTERVAL_MS: u64 = 100;

/// Number of externally triggered publishes that may happen back to back.
pub const PUBLISH_BURST: u32 = 8;

/// Reserved room name that resolves to the main lobby.
pub const LOBBY_ROOM_NAME: &str = "lobby";

/// Runtime settings shared by the main lobby and every room it creates.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub tick_interval: Duration,
    pub room_summary_every: u64,
    pub publish_interval: Duration,
    pub publish_burst: u32,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            room_summary_every: ROOM_SUMMARY_EVERY,
            publish_interval: Duration::from_millis(PUBLISH_INTERVAL_MS),
            publish_burst: PUBLISH_BURST,
        }
    }
}
