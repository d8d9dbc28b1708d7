//! Backend for a bilingual (English/Arabic) consulting site.
//!
//! The crate provides:
//!
//! - [`session`]: stateless, HMAC-signed admin sessions carried in a cookie
//! - [`rate_limit`]: a fixed-window, per-client limiter for public endpoints
//! - [`crypto`]: Argon2id password hashing
//! - [`content`]: per-locale site copy with in-memory and file-backed stores
//! - [`actions`]: login, contact, feedback and content-save workflows
//! - [`api`]: the axum HTTP surface (feature `axum_api`)

use std::fmt;

pub mod actions;
pub mod clock;
pub mod config;
pub mod content;
pub mod crypto;
pub mod events;
pub mod mail;
pub mod rate_limit;
pub mod repository;
pub mod session;
pub mod validators;

mod secret;

#[cfg(feature = "axum_api")]
pub mod api;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Environment, SiteConfig};
pub use content::{ContentRepository, Locale, SiteContent};
pub use repository::{AdminUser, MessageRepository, UserRepository};
pub use secret::SecretString;
pub use session::{SessionPayload, SessionSigner};

/// Errors produced by the site backend.
///
/// Authentication variants are deliberately coarse: callers surface them
/// with a single generic message so a response never reveals whether an
/// account exists or why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteError {
    InvalidCredentials,
    Unauthorized,
    PasswordHashError,
    TooManyRequests,
    Validation(String),
    Configuration(String),
    Delivery(String),
    Storage(String),
}

impl SiteError {
    /// True for errors that must be reported as a generic authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::Unauthorized)
    }
}

impl std::error::Error for SiteError {}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "Invalid email or password"),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::PasswordHashError => write!(f, "Failed to hash password"),
            Self::TooManyRequests => write!(f, "Too many requests, please try again shortly."),
            Self::Validation(msg) => write!(f, "Invalid input: {msg}"),
            Self::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            Self::Delivery(msg) => write!(f, "Delivery error: {msg}"),
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl From<validators::ValidationError> for SiteError {
    fn from(err: validators::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
