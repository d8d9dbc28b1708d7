use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use super::message::{ContactMessage, Feedback, MessageRepository, NewContactMessage, NewFeedback};
use crate::SiteError;
use crate::content::Locale;

/// Messages held in process memory, lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    contacts: RwLock<Vec<ContactMessage>>,
    feedback: RwLock<Vec<Feedback>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> SiteError {
    SiteError::Storage("message lock poisoned".to_owned())
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn record_contact(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, SiteError> {
        let mut contacts = self.contacts.write().map_err(|_| poisoned())?;
        let stored = ContactMessage {
            id: contacts.last().map_or(1, |m| m.id + 1),
            first_name: message.first_name,
            last_name: message.last_name,
            email: message.email,
            phone: message.phone,
            message: message.message,
            client_key: message.client_key,
            created_at: Utc::now(),
        };
        contacts.push(stored.clone());
        drop(contacts);
        Ok(stored)
    }

    async fn list_contacts(&self, limit: usize) -> Result<Vec<ContactMessage>, SiteError> {
        let contacts = self.contacts.read().map_err(|_| poisoned())?;
        Ok(contacts.iter().rev().take(limit).cloned().collect())
    }

    async fn record_feedback(&self, feedback: NewFeedback) -> Result<Feedback, SiteError> {
        let mut entries = self.feedback.write().map_err(|_| poisoned())?;
        let stored = Feedback {
            id: entries.last().map_or(1, |f| f.id + 1),
            name: feedback.name,
            rating: feedback.rating,
            comment: feedback.comment,
            locale: feedback.locale,
            created_at: Utc::now(),
        };
        entries.push(stored.clone());
        drop(entries);
        Ok(stored)
    }

    async fn list_feedback(
        &self,
        locale: Option<Locale>,
        limit: usize,
    ) -> Result<Vec<Feedback>, SiteError> {
        let entries = self.feedback.read().map_err(|_| poisoned())?;
        Ok(entries
            .iter()
            .rev()
            .filter(|f| locale.is_none_or(|l| f.locale == l))
            .take(limit)
            .cloned()
            .collect())
    }
}
