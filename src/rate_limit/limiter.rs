use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::limit::Limit;
use super::store::{InMemoryStore, RateLimitDecision, RateLimitStore};
use crate::{Clock, SystemClock};

/// Fixed-window limiter over an injected store and clock.
///
/// Two limiters built on separate stores never share counters.
///
/// ```rust
/// use himma::rate_limit::{InMemoryStore, Limit, RateLimiter};
/// use std::sync::Arc;
///
/// let limiter = RateLimiter::new(Arc::new(InMemoryStore::new()), Limit::per_minute(5));
/// ```
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    limit: Limit,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    #[must_use]
    pub fn new(store: Arc<dyn RateLimitStore>, limit: Limit) -> Self {
        Self {
            store,
            limit,
            clock: Arc::new(SystemClock),
        }
    }

    /// A limiter with its own private in-memory store.
    #[must_use]
    pub fn in_memory(limit: Limit) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), limit)
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn limit(&self) -> &Limit {
        &self.limit
    }

    pub fn store(&self) -> &Arc<dyn RateLimitStore> {
        &self.store
    }

    /// Records a request for `key` and reports whether it may proceed.
    ///
    /// A store failure is reported as `Limited` for the full window.
    pub async fn check(&self, key: &str) -> RateLimitDecision {
        let now = self.clock.now();
        match self.store.hit(key, &self.limit, now).await {
            Ok(decision) => {
                if decision.is_limited() {
                    log::info!(
                        target: "himma::rate_limit",
                        "msg=\"request throttled\" key=\"{key}\" limit={}",
                        self.limit.max_requests()
                    );
                }
                decision
            }
            Err(e) => {
                log::error!(
                    target: "himma::rate_limit",
                    "msg=\"rate limit store failed, rejecting\" key=\"{key}\" error=\"{e}\""
                );
                RateLimitDecision::Limited {
                    retry_after_secs: self.limit.window_secs().max(1),
                    reset_at: now
                        .checked_add_signed(self.limit.window())
                        .unwrap_or(DateTime::<Utc>::MAX_UTC),
                }
            }
        }
    }

    /// `true` when the request for `key` is within budget.
    pub async fn allow(&self, key: &str) -> bool {
        self.check(key).await.is_allowed()
    }

    /// Requests left in the current window without recording one.
    pub async fn remaining(&self, key: &str) -> u32 {
        let now = self.clock.now();
        match self.store.get(key).await {
            Ok(Some(bucket)) if now <= bucket.reset_at => {
                self.limit.max_requests().saturating_sub(bucket.count)
            }
            Ok(_) => self.limit.max_requests(),
            Err(_) => 0,
        }
    }

    pub async fn clear(&self, key: &str) {
        if let Err(e) = self.store.reset(key).await {
            log::warn!(
                target: "himma::rate_limit",
                "msg=\"failed to clear bucket\" key=\"{key}\" error=\"{e}\""
            );
        }
    }
}
