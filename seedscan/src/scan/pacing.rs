//! Request pacing between seeds

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

/// Decides how long to wait before the next seed hits the network
#[async_trait]
pub trait Pacer: Send {
    /// Wait until another seed may be checked
    async fn pace(&mut self);
}

/// Pacer that never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaced;

#[async_trait]
impl Pacer for Unpaced {
    async fn pace(&mut self) {}
}

/// Token bucket limiting how many seeds are checked per second
#[derive(Debug, Clone)]
pub struct TokenBucket {
    /// Tokens available; negative while callers are waiting on refill
    tokens: f64,
    /// Maximum number of tokens the bucket holds
    capacity: f64,
    /// Tokens added per second
    refill_rate: f64,
    /// Last time tokens were added
    last_refill: Instant,
}

impl TokenBucket {
    /// Create a full bucket
    ///
    /// Non-positive rates or capacities are raised to the smallest usable value.
    pub fn new(per_second: f64, capacity: f64) -> Self {
        Self::starting_at(per_second, capacity, Instant::now())
    }

    /// Create a full bucket whose refill clock starts at `now`
    pub fn starting_at(per_second: f64, capacity: f64, now: Instant) -> Self {
        let capacity = if capacity.is_finite() { capacity.max(1.0) } else { 1.0 };
        let refill_rate = if per_second.is_finite() && per_second > 0.0 { per_second } else { f64::MIN_POSITIVE };

        Self {
            tokens: capacity,
            capacity,
            refill_rate,
            last_refill: now,
        }
    }

    /// Take one token at `now`, returning how long the caller must wait for it
    pub fn reserve(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.capacity);
        self.last_refill = self.last_refill.max(now);

        self.tokens -= 1.0;
        if self.tokens >= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(-self.tokens / self.refill_rate).unwrap_or(Duration::MAX)
        }
    }
}

impl Default for TokenBucket {
    /// One seed per second
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[async_trait]
impl Pacer for TokenBucket {
    async fn pace(&mut self) {
        let wait = self.reserve(Instant::now());
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(duration: Duration, secs: f64) -> bool {
        (duration.as_secs_f64() - secs).abs() < 1e-6
    }

    #[test]
    fn test_first_request_is_free() {
        let start = Instant::now();
        let mut bucket = TokenBucket::starting_at(1.0, 1.0, start);

        assert_eq!(bucket.reserve(start), Duration::ZERO);
    }

    #[test]
    fn test_back_to_back_requests_wait_one_interval() {
        let start = Instant::now();
        let mut bucket = TokenBucket::starting_at(1.0, 1.0, start);

        bucket.reserve(start);
        assert!(approx(bucket.reserve(start), 1.0));
        // A third caller queues behind the second
        assert!(approx(bucket.reserve(start), 2.0));
    }

    #[test]
    fn test_refill_after_idle() {
        let start = Instant::now();
        let mut bucket = TokenBucket::starting_at(2.0, 1.0, start);

        bucket.reserve(start);
        assert_eq!(bucket.reserve(start + Duration::from_millis(500)), Duration::ZERO);
        assert!(approx(bucket.reserve(start + Duration::from_millis(500)), 0.5));
    }

    #[test]
    fn test_capacity_allows_bursts() {
        let start = Instant::now();
        let mut bucket = TokenBucket::starting_at(1.0, 3.0, start);

        for _ in 0..3 {
            assert_eq!(bucket.reserve(start), Duration::ZERO);
        }
        assert!(approx(bucket.reserve(start), 1.0));
    }

    #[test]
    fn test_idle_time_does_not_exceed_capacity() {
        let start = Instant::now();
        let mut bucket = TokenBucket::starting_at(1.0, 1.0, start);

        bucket.reserve(start);
        let later = start + Duration::from_secs(60);
        assert_eq!(bucket.reserve(later), Duration::ZERO);
        assert!(approx(bucket.reserve(later), 1.0));
    }

    #[tokio::test]
    async fn test_unpaced_returns_immediately() {
        let mut pacer = Unpaced;
        for _ in 0..100 {
            pacer.pace().await;
        }
    }
}
