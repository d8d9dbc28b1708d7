//! Stateless admin sessions.
//!
//! A session is a signed token stored in the `session` cookie:
//!
//! ```text
//! base64url(JSON {"uid":1,"email":"admin@example.com","exp":1735689600}) "." base64url(HMAC-SHA256)
//! ```
//!
//! Nothing is stored server-side. A token is accepted while its MAC matches
//! and `exp` lies in the future; it cannot be revoked before then.

mod config;
mod cookie;
mod token;

pub use config::{MIN_SECRET_LENGTH, SameSite, SessionConfig};
pub use cookie::{
    LANG_COOKIE_NAME, build_cookie, build_removal_cookie, build_session_cookie, read_cookie,
};
pub use token::{DEFAULT_SESSION_TTL_SECS, SessionSigner};

use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
///
/// Wire keys are `uid`, `email` and `exp` so cookies minted by earlier
/// deployments of the site stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    #[serde(rename = "uid")]
    pub subject_id: i64,
    #[serde(rename = "email")]
    pub subject_email: String,
    /// Unix seconds.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl SessionPayload {
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.expires_at <= now_secs
    }
}
