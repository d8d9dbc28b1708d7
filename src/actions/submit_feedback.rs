use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::events::{EventDispatcher, SiteEvent};
use crate::repository::{Feedback, MessageRepository, NewFeedback};
use crate::validators::{ValidationError, validate_max_chars, validate_rating, validate_required};
use crate::{Locale, SiteError};

pub const MAX_COMMENT_CHARS: usize = 2000;
pub const MAX_NAME_CHARS: usize = 100;

/// Limiter keys for feedback carry this prefix so they never share a
/// bucket with contact submissions from the same client.
pub const FEEDBACK_KEY_PREFIX: &str = "feedback:";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub locale: Option<String>,
}

impl FeedbackForm {
    pub fn validate(&self) -> Result<NewFeedback, ValidationError> {
        let rating = validate_rating(self.rating)?;
        validate_required("comment", &self.comment)?;
        validate_max_chars("comment", &self.comment, MAX_COMMENT_CHARS)?;

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        if let Some(name) = name {
            validate_max_chars("name", name, MAX_NAME_CHARS)?;
        }

        Ok(NewFeedback {
            name: name.map(ToOwned::to_owned),
            rating,
            comment: self.comment.trim().to_owned(),
            locale: Locale::from_param(self.locale.as_deref()),
        })
    }
}

pub struct SubmitFeedbackAction {
    messages: Arc<dyn MessageRepository>,
    events: EventDispatcher,
}

impl SubmitFeedbackAction {
    pub fn new(messages: Arc<dyn MessageRepository>, events: EventDispatcher) -> Self {
        Self { messages, events }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "submit_feedback", skip_all, err)
    )]
    pub async fn execute(&self, form: &FeedbackForm) -> Result<Feedback, SiteError> {
        let feedback = form.validate()?;
        let stored = self.messages.record_feedback(feedback).await?;

        self.events
            .dispatch(SiteEvent::FeedbackSubmitted {
                feedback_id: stored.id,
                rating: stored.rating,
                locale: stored.locale,
                at: Utc::now(),
            })
            .await;

        Ok(stored)
    }
}
