//! Retry policy with capped exponential backoff and `Retry-After` handling.
//!
//! Two independent ladders drive the retry loop:
//!
//! - transport errors and 5xx responses consume the `max_retries` budget and
//!   sleep for the current interval, which then grows by `multiplier`;
//! - 429 responses wait for the server's `Retry-After` hint (or the current
//!   interval) and double the interval, without touching `max_retries`.
//!
//! Both ladders share one interval, clamped at `max_interval`.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::{Error, ErrorKind, Result};

/// Backoff configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    /// Retries allowed after the initial attempt for transport errors and 5xx.
    pub max_retries: u32,
    /// Interval before the first retry.
    pub initial_interval: Duration,
    /// Geometric growth factor, strictly greater than 1.0.
    pub multiplier: f64,
    /// Upper bound for any computed interval.
    pub max_interval: Duration,
    /// Optional upper bound for a server-supplied `Retry-After` wait.
    /// `None` waits as long as the server asks.
    pub max_retry_after: Option<Duration>,
    /// Optional bound on consecutive 429 waits. `None` waits as long as the
    /// server keeps rate limiting (callers bound it with cancellation).
    pub max_rate_limit_retries: Option<u32>,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_interval: Duration::from_millis(500),
            multiplier: 2.0,
            max_interval: Duration::from_millis(5000),
            max_retry_after: None,
            max_rate_limit_retries: None,
        }
    }
}

impl BackoffPolicy {
    /// Set the retry budget for transport errors and 5xx responses.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the initial interval.
    pub fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    /// Set the growth multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the interval cap.
    pub fn with_max_interval(mut self, interval: Duration) -> Self {
        self.max_interval = interval;
        self
    }

    /// Cap server-supplied waits at `wait`.
    pub fn with_max_retry_after(mut self, wait: Duration) -> Self {
        self.max_retry_after = Some(wait);
        self
    }

    /// Bound the number of 429 waits per request.
    pub fn with_max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.max_rate_limit_retries = Some(retries);
        self
    }

    /// Disable all retries, 429 waits included.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            max_rate_limit_retries: Some(0),
            ..Default::default()
        }
    }

    /// Check the policy invariants.
    pub fn validate(&self) -> Result<()> {
        if !self.multiplier.is_finite() || self.multiplier <= 1.0 {
            return Err(Error::new(ErrorKind::Config(format!(
                "backoff multiplier must be greater than 1.0, got {}",
                self.multiplier
            ))));
        }
        if self.initial_interval > self.max_interval {
            return Err(Error::new(ErrorKind::Config(format!(
                "initial interval {:?} exceeds max interval {:?}",
                self.initial_interval, self.max_interval
            ))));
        }
        Ok(())
    }

    /// Interval following `current`: `current * multiplier`, clamped.
    pub fn next_interval(&self, current: Duration) -> Duration {
        self.grow(current, self.multiplier)
    }

    /// The sequence of sleeps the server-error ladder would use.
    pub fn intervals(&self) -> impl Iterator<Item = Duration> + '_ {
        let first = std::cmp::min(self.initial_interval, self.max_interval);
        std::iter::successors(Some(first), move |current| Some(self.next_interval(*current)))
    }

    fn grow(&self, current: Duration, factor: f64) -> Duration {
        let grown = Duration::try_from_secs_f64(current.as_secs_f64() * factor)
            .unwrap_or(self.max_interval);
        std::cmp::min(grown, self.max_interval)
    }
}

/// Decision taken by [`RetryState`] after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the given duration, then attempt again.
    Backoff(Duration),
    /// Budget spent; return the last response or error.
    Exhausted,
}

/// Per-request retry bookkeeping. Never shared between requests.
#[derive(Debug, Clone)]
pub struct RetryState<'a> {
    policy: &'a BackoffPolicy,
    attempt: u32,
    rate_limit_waits: u32,
    interval: Duration,
}

impl<'a> RetryState<'a> {
    /// Start a fresh ladder.
    pub fn new(policy: &'a BackoffPolicy) -> Self {
        Self {
            policy,
            attempt: 0,
            rate_limit_waits: 0,
            interval: std::cmp::min(policy.initial_interval, policy.max_interval),
        }
    }

    /// Retries consumed so far (0 on the initial attempt).
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Total requests sent once the current one completes.
    pub fn attempts_made(&self) -> u32 {
        self.attempt + self.rate_limit_waits + 1
    }

    /// Interval the next server-error backoff would sleep for.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Transport error or 5xx: back off if budget remains.
    pub fn on_server_failure(&mut self) -> RetryDecision {
        if self.attempt >= self.policy.max_retries {
            return RetryDecision::Exhausted;
        }
        let wait = self.interval;
        self.interval = self.policy.next_interval(self.interval);
        self.attempt += 1;
        RetryDecision::Backoff(wait)
    }

    /// 429: wait for the server hint (or the current interval), then double.
    pub fn on_rate_limited(&mut self, retry_after: Option<Duration>) -> RetryDecision {
        if let Some(max) = self.policy.max_rate_limit_retries {
            if self.rate_limit_waits >= max {
                return RetryDecision::Exhausted;
            }
        }
        let wait = match retry_after {
            Some(hint) if !hint.is_zero() => match self.policy.max_retry_after {
                Some(cap) => std::cmp::min(hint, cap),
                None => hint,
            },
            _ => self.interval,
        };
        self.interval = self.policy.grow(self.interval, 2.0);
        self.rate_limit_waits += 1;
        RetryDecision::Backoff(wait)
    }
}

/// Obsolete HTTP-date forms still accepted by RFC 9110 recipients.
const RFC850_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Parse an HTTP date in IMF-fixdate, RFC 850 or asctime form.
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc2822(value) {
        return Some(at.with_timezone(&Utc));
    }
    [RFC850_FORMAT, ASCTIME_FORMAT]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parse a `Retry-After` header value relative to `now`.
///
/// Accepts delay-seconds or an HTTP date. Non-positive delays, past dates and
/// unparseable values yield `None`.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let trimmed = value.trim();

    if let Ok(seconds) = trimmed.parse::<i64>() {
        return u64::try_from(seconds)
            .ok()
            .filter(|s| *s > 0)
            .map(Duration::from_secs);
    }

    let at = parse_http_date(trimmed)?;
    (at - now)
        .to_std()
        .ok()
        .filter(|d| !d.is_zero())
}
