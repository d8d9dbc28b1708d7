use chrono::Duration;

/// Accepted requests per key per window, out of the box.
pub const DEFAULT_MAX_REQUESTS: u32 = 5;

/// Window length in milliseconds, out of the box.
pub const DEFAULT_WINDOW_MS: i64 = 60_000;

/// A fixed-window budget: at most `max_requests` accepted per key per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub(crate) max_requests: u32,
    pub(crate) window: Duration,
}

impl Default for Limit {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, Duration::milliseconds(DEFAULT_WINDOW_MS))
    }
}

impl Limit {
    /// A zero budget is raised to one; a non-positive window to one millisecond.
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window: window.max(Duration::milliseconds(1)),
        }
    }

    #[must_use]
    pub fn per_second(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::seconds(1))
    }

    #[must_use]
    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::minutes(1))
    }

    #[must_use]
    pub fn per_hour(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::hours(1))
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn window_secs(&self) -> i64 {
        self.window.num_seconds()
    }
}
