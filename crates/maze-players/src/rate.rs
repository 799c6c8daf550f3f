//! Fixed-window submission quota, keyed by client address

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{PlayerStore, StoreError};

/// Quota configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    pub max_requests: u32,
    /// Window length, measured from the first request of the window
    pub period: TimeDelta,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 2,
            period: TimeDelta::hours(24),
        }
    }
}

/// Per-client counter as kept in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    pub count: u32,
    pub window_start: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: TimeDelta },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimiter {
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Count a request from `client` at `now`.
    ///
    /// Rejected requests are not counted. A request after the window has
    /// expired starts a new window with a count of one.
    pub fn check<S: PlayerStore>(
        &self,
        store: &mut S,
        client: &str,
        now: DateTime<Utc>,
    ) -> Result<RateDecision, StoreError> {
        let max = self.config.max_requests;

        let record = match store.rate_record(client)? {
            Some(record) if now - record.window_start < self.config.period => {
                if record.count >= max {
                    let retry_after = record.window_start + self.config.period - now;
                    log::warn!("rate limit hit for {} ({} requests)", client, record.count);
                    return Ok(RateDecision::Limited { retry_after });
                }
                RateRecord {
                    count: record.count + 1,
                    ..record
                }
            }
            _ => RateRecord {
                count: 1,
                window_start: now,
            },
        };

        store.put_rate_record(client, record)?;
        Ok(RateDecision::Allowed {
            remaining: max.saturating_sub(record.count),
        })
    }
}
