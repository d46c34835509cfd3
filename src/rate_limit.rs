//! Client-side hierarchical rate limiting.
//!
//! A [`RateLimiter`] owns one token bucket per [`RateLimitRule`]; a request
//! is admitted once every bucket can satisfy it, so the scarcest bucket
//! governs. Buckets refill continuously (fractional tokens) on a monotonic
//! clock rather than resetting at window boundaries.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::Error;

/// One rate rule: at most `limit` requests per `period`.
///
/// `limit` must be positive and `period` non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub limit: u32,
    pub period: Duration,
}

impl RateLimitRule {
    pub fn new(limit: u32, period: Duration) -> Self {
        debug_assert!(limit > 0, "rate limit must be positive");
        debug_assert!(!period.is_zero(), "rate period must be non-zero");
        Self { limit, period }
    }

    /// Refill rate in tokens per second.
    pub fn rate(&self) -> f64 {
        f64::from(self.limit) / self.period.as_secs_f64()
    }
}

/// Bucket state for a single rule. Created full, lives as long as the
/// limiter, never reset externally.
#[derive(Debug)]
struct TokenBucket {
    rule: RateLimitRule,
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(rule: RateLimitRule, now: Instant) -> Self {
        Self {
            rule,
            tokens: f64::from(rule.limit),
            last_refill: now,
        }
    }

    /// Credits tokens for the time elapsed since the last refill, capped at
    /// the rule's limit. `saturating_duration_since` keeps the count
    /// monotonic even if instants arrive out of order.
    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill);
        self.tokens = (self.tokens + elapsed.as_secs_f64() * self.rule.rate())
            .min(f64::from(self.rule.limit));
        self.last_refill = now;
    }

    /// How long until this bucket alone could satisfy `tokens`.
    fn time_to_wait(&mut self, tokens: f64, now: Instant) -> Duration {
        self.refill(now);
        if self.tokens >= tokens {
            return Duration::ZERO;
        }
        Duration::from_secs_f64((tokens - self.tokens) / self.rule.rate())
    }
}

/// The wait required before every bucket can satisfy `tokens` at once.
///
/// This is the single admission computation shared by both acquire flavors;
/// taking `now` explicitly keeps it a pure function of bucket state and the
/// clock.
fn required_wait(buckets: &mut [TokenBucket], tokens: f64, now: Instant) -> Duration {
    buckets
        .iter_mut()
        .map(|bucket| bucket.time_to_wait(tokens, now))
        .max()
        .unwrap_or(Duration::ZERO)
}

/// Debits every bucket unconditionally. Under thread contention after a
/// shared wait computation a bucket may dip transiently negative: the
/// limiter bounds rate, not the exact instantaneous count (soft limit,
/// no FIFO fairness guarantee).
fn debit(buckets: &mut [TokenBucket], tokens: f64) {
    for bucket in buckets {
        bucket.tokens -= tokens;
    }
}

fn bounded(wait: Duration, timeout: Option<Duration>) -> Result<Duration, Error> {
    match timeout {
        Some(limit) if wait > limit => Err(Error::RateLimitExceeded { wait }),
        _ => Ok(wait),
    }
}

/// Hierarchical token-bucket rate limiter.
///
/// Owned by exactly one client instance; never global. All rules apply
/// simultaneously and the tightest currently-binding rule governs.
///
/// The blocking [`acquire`](Self::acquire) serializes concurrent threads by
/// holding the limiter's mutex across the whole decide-sleep-debit
/// sequence. The cooperative [`acquire_async`](Self::acquire_async) takes
/// the mutex only for the bounded compute and debit steps and never across
/// its suspension point: it is meant to be driven by one logical task at a
/// time, and concurrent cooperative callers sharing a limiter must
/// serialize themselves externally. Mixing both flavors concurrently on one
/// instance likewise requires external synchronization.
#[derive(Debug)]
pub struct RateLimiter {
    buckets: Mutex<Vec<TokenBucket>>,
}

impl RateLimiter {
    /// Builds one bucket per rule, all starting full.
    pub fn new(rules: &[RateLimitRule]) -> Self {
        let now = Instant::now();
        Self {
            buckets: Mutex::new(rules.iter().map(|rule| TokenBucket::new(*rule, now)).collect()),
        }
    }

    /// The wait currently required to admit a request of `tokens`.
    pub fn required_wait(&self, tokens: u32) -> Duration {
        required_wait(&mut self.lock(), f64::from(tokens), Instant::now())
    }

    /// Admits a request of `tokens`, sleeping the calling thread as needed.
    ///
    /// With a `timeout`, fails immediately with
    /// [`Error::RateLimitExceeded`] when the required wait exceeds it: no
    /// sleep, no debit. The mutex is held for the entire sequence so
    /// concurrent threads cannot interleave their decisions.
    pub fn acquire(&self, tokens: u32, timeout: Option<Duration>) -> Result<(), Error> {
        let mut buckets = self.lock();
        let wait = bounded(
            required_wait(&mut buckets, f64::from(tokens), Instant::now()),
            timeout,
        )?;
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        debit(&mut buckets, f64::from(tokens));
        Ok(())
    }

    /// Admits a request of `tokens`, yielding to the scheduler as needed.
    ///
    /// Same decision and timeout semantics as [`acquire`](Self::acquire);
    /// only the waiting differs. No lock is held across the suspension —
    /// see the type-level notes on sharing.
    pub async fn acquire_async(&self, tokens: u32, timeout: Option<Duration>) -> Result<(), Error> {
        let wait = {
            let mut buckets = self.lock();
            bounded(
                required_wait(&mut buckets, f64::from(tokens), Instant::now()),
                timeout,
            )?
        };
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        debit(&mut self.lock(), f64::from(tokens));
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TokenBucket>> {
        // Bucket state is plain counters and stays meaningful even if a
        // holder panicked mid-update.
        self.buckets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
