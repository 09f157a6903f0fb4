//! In-memory rate limiter using governor crate.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};

use chronicle_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    /// GCRA quota equivalent to `max_requests` per `window`.
    fn quota(&self) -> Quota {
        Quota::with_period(self.window / self.max_requests)
            .expect("Valid quota")
            .allow_burst(NonZeroU32::new(self.max_requests).expect("Non-zero"))
    }
}

/// In-memory rate limiter using the GCRA algorithm.
///
/// Limits are per-process, not distributed across instances.
pub struct InMemoryRateLimiter {
    limiter: DirectRateLimiter,
    config: RateLimitConfig,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            limiter: DirectRateLimiter::direct(config.quota()),
            config,
        }
    }

    pub fn from_env() -> Self {
        let config = RateLimitConfig {
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            window: Duration::from_secs(
                std::env::var("RATE_LIMIT_WINDOW_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        };
        Self::new(config)
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, _key: &str) -> Result<RateLimitResult, RateLimitError> {
        // Global limiter; the key is ignored.
        let result = match self.limiter.check() {
            Ok(_) => RateLimitResult {
                allowed: true,
                remaining: self.config.max_requests, // Approximate
                reset_after: self.config.window,
            },
            Err(not_until) => RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_after: not_until.wait_time_from(DefaultClock::default().now()),
            },
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn burst_is_allowed_then_limited() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 2,
            window: Duration::from_secs(3600),
        });

        assert!(limiter.check("k").await.unwrap().allowed);
        assert!(limiter.check("k").await.unwrap().allowed);

        let denied = limiter.check("k").await.unwrap();
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
    }
}
