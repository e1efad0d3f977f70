//! Rate limiting for publishes and inbound flooding (GCRA through Governor).

use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovernorLimiter,
};
use std::num::NonZeroU32;
use std::time::Duration;

/// Allows one event per `interval`, with up to `burst` events back to back.
///
/// A zero interval disables the limit. A zero burst is treated as one.
pub struct RateLimiter {
    limiter: Option<GovernorLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    pub fn new(interval: Duration, burst: u32) -> Self {
        let burst = NonZeroU32::new(burst).unwrap_or(NonZeroU32::MIN);
        let limiter = Quota::with_period(interval)
            .map(|quota| GovernorLimiter::direct(quota.allow_burst(burst)));
        Self { limiter }
    }

    /// Take one cell if available. Returns false if the caller is over the limit.
    pub fn try_acquire(&self) -> bool {
        self.limiter
            .as_ref()
            .is_none_or(|limiter| limiter.check().is_ok())
    }
}
