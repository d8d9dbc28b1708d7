//! Fixed-window request throttling.
//!
//! Each client key may make at most [`Limit::max_requests`] accepted
//! requests per window. The first request after a window ends opens a new
//! one; rejected requests do not extend or consume the current window.
//!
//! # Example
//!
//! ```rust
//! use himma::rate_limit::{Limit, RateLimiter};
//!
//! # async fn run() {
//! let limiter = RateLimiter::in_memory(Limit::per_minute(5));
//! if !limiter.allow("203.0.113.7").await {
//!     // respond with 429
//! }
//! # }
//! ```

mod client_key;
mod limit;
mod limiter;
mod store;

#[cfg(feature = "axum_api")]
pub use client_key::client_key;
pub use client_key::{UNKNOWN_CLIENT_KEY, client_key_from_forwarded};
pub use limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MS, Limit};
pub use limiter::RateLimiter;
pub use store::{Bucket, InMemoryStore, RateLimitDecision, RateLimitStore};
