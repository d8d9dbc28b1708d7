use chrono::{DateTime, Utc};

use crate::content::Locale;

/// Things that happen on the site that operators may want to observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteEvent {
    // authentication
    LoginSucceeded {
        user_id: i64,
        email: String,
        at: DateTime<Utc>,
    },
    LoginFailed {
        email: String,
        reason: &'static str,
        at: DateTime<Utc>,
    },
    LoggedOut {
        user_id: i64,
        at: DateTime<Utc>,
    },
    AdminSeeded {
        user_id: i64,
        email: String,
        at: DateTime<Utc>,
    },

    // submissions
    ContactSubmitted {
        message_id: i64,
        client_key: String,
        at: DateTime<Utc>,
    },
    ContactDiscarded {
        client_key: String,
        at: DateTime<Utc>,
    },
    FeedbackSubmitted {
        feedback_id: i64,
        rating: u8,
        locale: Locale,
        at: DateTime<Utc>,
    },
    RequestThrottled {
        client_key: String,
        endpoint: &'static str,
        at: DateTime<Utc>,
    },

    // content
    ContentSaved {
        locale: Locale,
        user_id: i64,
        at: DateTime<Utc>,
    },
}

impl SiteEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginSucceeded { .. } => "auth.login.success",
            Self::LoginFailed { .. } => "auth.login.failed",
            Self::LoggedOut { .. } => "auth.logout",
            Self::AdminSeeded { .. } => "auth.admin.seeded",
            Self::ContactSubmitted { .. } => "contact.submitted",
            Self::ContactDiscarded { .. } => "contact.discarded",
            Self::FeedbackSubmitted { .. } => "feedback.submitted",
            Self::RequestThrottled { .. } => "rate_limit.throttled",
            Self::ContentSaved { .. } => "content.saved",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::LoginSucceeded { at, .. }
            | Self::LoginFailed { at, .. }
            | Self::LoggedOut { at, .. }
            | Self::AdminSeeded { at, .. }
            | Self::ContactSubmitted { at, .. }
            | Self::ContactDiscarded { at, .. }
            | Self::FeedbackSubmitted { at, .. }
            | Self::RequestThrottled { at, .. }
            | Self::ContentSaved { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_and_timestamps() {
        let now = Utc::now();

        let login = SiteEvent::LoginFailed {
            email: "a@example.com".to_owned(),
            reason: "unknown_user",
            at: now,
        };
        assert_eq!(login.name(), "auth.login.failed");
        assert_eq!(login.timestamp(), now);

        let throttled = SiteEvent::RequestThrottled {
            client_key: "1.2.3.4".to_owned(),
            endpoint: "contact",
            at: now,
        };
        assert_eq!(throttled.name(), "rate_limit.throttled");

        let saved = SiteEvent::ContentSaved {
            locale: Locale::Ar,
            user_id: 1,
            at: now,
        };
        assert_eq!(saved.name(), "content.saved");
    }
}
