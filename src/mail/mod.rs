//! Outbound email for contact-form submissions.

mod log_mailer;
#[cfg(any(test, feature = "mocks"))]
mod mock;
mod resend;

pub use log_mailer::LogMailer;
#[cfg(any(test, feature = "mocks"))]
pub use mock::MockMailer;
pub use resend::{RESEND_ENDPOINT, ResendMailer};

use async_trait::async_trait;
use serde::Serialize;

use crate::SiteError;

/// A fully rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactEmail {
    pub to: String,
    pub from: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Errors are `SiteError::Delivery`.
    async fn send(&self, email: &ContactEmail) -> Result<(), SiteError>;
}

/// Escapes text for interpolation into HTML element content or attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
