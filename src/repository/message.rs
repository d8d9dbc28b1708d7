use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SiteError;
use crate::content::Locale;

/// A submission from the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    pub client_key: String,
    pub created_at: DateTime<Utc>,
}

/// A validated contact submission not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub client_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub rating: u8,
    pub comment: String,
    pub locale: Locale,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub name: Option<String>,
    pub rating: u8,
    pub comment: String,
    pub locale: Locale,
}

/// Inbox for contact messages and feedback. Listings are newest first.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn record_contact(&self, message: NewContactMessage)
    -> Result<ContactMessage, SiteError>;
    async fn list_contacts(&self, limit: usize) -> Result<Vec<ContactMessage>, SiteError>;
    async fn record_feedback(&self, feedback: NewFeedback) -> Result<Feedback, SiteError>;
    /// `None` lists every locale.
    async fn list_feedback(
        &self,
        locale: Option<Locale>,
        limit: usize,
    ) -> Result<Vec<Feedback>, SiteError>;
}
