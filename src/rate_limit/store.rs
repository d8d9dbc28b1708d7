use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::limit::Limit;
use crate::SiteError;

/// Per-key counter for the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub count: u32,
    pub reset_at: DateTime<Utc>,
}

impl Bucket {
    /// Whole seconds until the window resets, rounded up.
    pub fn retry_after_secs(&self, now: DateTime<Utc>) -> i64 {
        let millis = (self.reset_at - now).num_milliseconds().max(0);
        (millis + 999) / 1000
    }
}

/// Outcome of recording one request against a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed {
        remaining: u32,
        reset_at: DateTime<Utc>,
    },
    Limited {
        retry_after_secs: i64,
        reset_at: DateTime<Utc>,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    pub fn is_limited(&self) -> bool {
        matches!(self, Self::Limited { .. })
    }

    pub fn retry_after_secs(&self) -> Option<i64> {
        match self {
            Self::Limited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            Self::Allowed { .. } => None,
        }
    }

    pub fn reset_at(&self) -> DateTime<Utc> {
        match self {
            Self::Allowed { reset_at, .. } | Self::Limited { reset_at, .. } => *reset_at,
        }
    }
}

/// Storage for fixed-window buckets.
///
/// `hit` must apply the read-check-write as one atomic step per key;
/// concurrent hits on the same key may never both observe the last free slot.
/// Implement this for a shared backend when several instances must share
/// one budget.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Records one request for `key` at `now`.
    ///
    /// Starts a fresh window when there is no bucket or `now` is past its
    /// `reset_at`. A rejected request leaves the bucket unchanged.
    async fn hit(
        &self,
        key: &str,
        limit: &Limit,
        now: DateTime<Utc>,
    ) -> Result<RateLimitDecision, SiteError>;

    async fn get(&self, key: &str) -> Result<Option<Bucket>, SiteError>;

    async fn reset(&self, key: &str) -> Result<(), SiteError>;
}

/// Process-local bucket map.
///
/// Best effort: state is lost on restart and every process has its own map,
/// so N instances admit up to N times the configured budget.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops buckets whose window ended more than `grace` before `now`.
    ///
    /// Returns the number of buckets removed. Run periodically to bound
    /// memory by the number of recently active clients.
    pub fn sweep_expired(&self, now: DateTime<Utc>, grace: Duration) -> usize {
        let Ok(mut buckets) = self.buckets.lock() else {
            return 0;
        };
        let before = buckets.len();
        buckets.retain(|_, bucket| {
            bucket
                .reset_at
                .checked_add_signed(grace)
                .is_none_or(|kept_until| kept_until >= now)
        });
        before - buckets.len()
    }

    pub fn len(&self) -> usize {
        self.buckets.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error() -> SiteError {
    SiteError::Storage("rate limit bucket lock poisoned".to_owned())
}

#[async_trait]
#[allow(clippy::significant_drop_tightening)]
impl RateLimitStore for InMemoryStore {
    async fn hit(
        &self,
        key: &str,
        limit: &Limit,
        now: DateTime<Utc>,
    ) -> Result<RateLimitDecision, SiteError> {
        let mut buckets = self.buckets.lock().map_err(|_| lock_error())?;

        if let Some(bucket) = buckets.get_mut(key) {
            if now <= bucket.reset_at {
                if bucket.count < limit.max_requests {
                    bucket.count += 1;
                    return Ok(RateLimitDecision::Allowed {
                        remaining: limit.max_requests - bucket.count,
                        reset_at: bucket.reset_at,
                    });
                }
                return Ok(RateLimitDecision::Limited {
                    retry_after_secs: bucket.retry_after_secs(now),
                    reset_at: bucket.reset_at,
                });
            }
        }

        let reset_at = now
            .checked_add_signed(limit.window)
            .ok_or_else(|| SiteError::Storage("rate limit window overflows the clock".to_owned()))?;
        let bucket = Bucket {
            count: 1,
            reset_at,
        };
        buckets.insert(key.to_owned(), bucket);

        Ok(RateLimitDecision::Allowed {
            remaining: limit.max_requests.saturating_sub(1),
            reset_at: bucket.reset_at,
        })
    }

    async fn get(&self, key: &str) -> Result<Option<Bucket>, SiteError> {
        let buckets = self.buckets.lock().map_err(|_| lock_error())?;
        Ok(buckets.get(key).copied())
    }

    async fn reset(&self, key: &str) -> Result<(), SiteError> {
        self.buckets.lock().map_err(|_| lock_error())?.remove(key);
        Ok(())
    }
}
