/*!
 * Token-bucket rate limiter for provider request pacing.
 *
 * The bucket refills continuously at `refill_per_sec` up to `capacity`.
 * `acquire` suspends until a token is available, so pacing policy stays out
 * of the translation algorithms themselves.
 */

use parking_lot::Mutex;
use std::time::{Duration, Instant};

use crate::app_config::LimiterConfig;

/// Mutable bucket state
struct BucketState {
    /// Currently available tokens
    tokens: f64,
    /// Instant of the last refill
    last_refill: Instant,
}

/// Token-bucket rate limiter
pub struct RateLimiter {
    /// Maximum tokens (burst size)
    capacity: f64,
    /// Tokens added per second
    refill_per_sec: f64,
    /// Shared bucket state
    state: Mutex<BucketState>,
}

impl RateLimiter {
    /// Create a limiter from configuration
    pub fn new(config: &LimiterConfig) -> Self {
        let capacity = f64::from(config.capacity.max(1));
        Self {
            capacity,
            refill_per_sec: config.refill_per_sec.max(0.001),
            state: Mutex::new(BucketState {
                // Bucket starts full so the first burst is not delayed
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Acquire one token, sleeping until one is available
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock();
                self.refill(&mut state);

                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    None
                } else {
                    // Time until one full token accrues
                    let deficit = 1.0 - state.tokens;
                    Some(Duration::from_secs_f64(deficit / self.refill_per_sec))
                }
            };

            match wait {
                None => return,
                Some(duration) => tokio::time::sleep(duration).await,
            }
        }
    }

    /// Try to acquire a token without waiting
    pub fn try_acquire(&self) -> bool {
        let mut state = self.state.lock();
        self.refill(&mut state);

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Add accrued tokens since the last refill
    fn refill(&self, state: &mut BucketState) {
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill).as_secs_f64();

        if elapsed > 0.0 {
            state.tokens = (state.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            state.last_refill = now;
        }
    }
}
