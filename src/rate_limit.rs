//! Token-bucket rate limiter.
//!
//! Permits are spaced `interval / rate` apart. Time the caller leaves unused
//! is banked as credit, capped at `slack` permits, so a client that has been
//! idle may issue up to `slack` requests back to back before being paced
//! again. Callers are never rejected; [`TokenBucket::acquire`] waits.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Burst allowance used by the client: up to this many permits can be banked.
pub const DEFAULT_SLACK: u32 = 100;

/// A token bucket shared by all clones of a client.
#[derive(Debug)]
pub struct TokenBucket {
    /// Time between two permits at the steady rate, in nanoseconds.
    per_request: i128,

    /// Largest credit (negative wait) that may be banked, in nanoseconds.
    max_slack: i128,

    state: Mutex<BucketState>,
}

#[derive(Debug, Default)]
struct BucketState {
    /// When the previous permit was granted.
    last: Option<Instant>,

    /// Outstanding wait; negative values are banked credit.
    sleep_for: i128,
}

impl TokenBucket {
    /// Creates a bucket granting `rate` permits per `interval`, with up to
    /// `slack` permits of burst credit.
    ///
    /// A `rate` of zero is treated as one.
    pub fn new(rate: u32, interval: Duration, slack: u32) -> Self {
        let per_request = interval.as_nanos() as i128 / i128::from(rate.max(1));
        Self {
            per_request,
            max_slack: per_request * i128::from(slack),
            state: Mutex::new(BucketState::default()),
        }
    }

    /// Creates a bucket for a per-minute budget with [`DEFAULT_SLACK`].
    pub fn per_minute(max_requests_per_minute: u32) -> Self {
        Self::new(
            max_requests_per_minute,
            Duration::from_secs(60),
            DEFAULT_SLACK,
        )
    }

    /// Returns the steady-state spacing between permits.
    pub fn interval_between_permits(&self) -> Duration {
        Duration::from_nanos(self.per_request as u64)
    }

    /// Waits until a permit is available.
    ///
    /// Concurrent callers queue up: each reservation is taken under the lock
    /// and the wait happens after it is released.
    pub async fn acquire(&self) {
        let grant = self.reserve(Instant::now());
        if grant > Instant::now() {
            tracing::debug!(
                wait_ms = grant.saturating_duration_since(Instant::now()).as_millis() as u64,
                "Rate limiter delaying request"
            );
            tokio::time::sleep_until(grant).await;
        }
    }

    /// Reserves the next permit and returns the instant it becomes valid.
    fn reserve(&self, now: Instant) -> Instant {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let Some(last) = state.last else {
            state.last = Some(now);
            return now;
        };

        state.sleep_for += self.per_request - signed_nanos_between(last, now);
        if state.sleep_for < -self.max_slack {
            state.sleep_for = -self.max_slack;
        }

        if state.sleep_for > 0 {
            let grant = now + Duration::from_nanos(state.sleep_for as u64);
            state.last = Some(grant);
            state.sleep_for = 0;
            grant
        } else {
            state.last = Some(now);
            now
        }
    }
}

/// `to - from` in nanoseconds, negative when `to` is earlier.
fn signed_nanos_between(from: Instant, to: Instant) -> i128 {
    match to.checked_duration_since(from) {
        Some(elapsed) => elapsed.as_nanos() as i128,
        None => -(from.duration_since(to).as_nanos() as i128),
    }
}
