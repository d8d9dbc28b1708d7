use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::config::ContactConfig;
use crate::events::{EventDispatcher, SiteEvent};
use crate::mail::{ContactEmail, Mailer, escape_html};
use crate::repository::{ContactMessage, MessageRepository, NewContactMessage};
use crate::validators::{ValidationError, validate_email, validate_min_chars, validate_required};
use crate::SiteError;

/// Shortest accepted message, in characters.
pub const MIN_MESSAGE_CHARS: usize = 5;

/// Body of a contact-form submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
    /// Honeypot. Hidden from people, filled in by bots.
    #[serde(default)]
    pub website: Option<String>,
}

impl ContactForm {
    /// Trims every field and checks it.
    pub fn validate(&self, client_key: &str) -> Result<NewContactMessage, ValidationError> {
        validate_required("firstName", &self.first_name)?;
        validate_required("lastName", &self.last_name)?;
        validate_email(&self.email)?;
        validate_min_chars("message", &self.message, MIN_MESSAGE_CHARS)?;

        Ok(NewContactMessage {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(ToOwned::to_owned),
            message: self.message.trim().to_owned(),
            client_key: client_key.to_owned(),
        })
    }

    fn is_bot(&self) -> bool {
        self.website.as_deref().is_some_and(|w| !w.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Delivered(ContactMessage),
    /// Honeypot tripped; reported to the client as success.
    Discarded,
}

/// Validates, stores and forwards a contact-form submission by email.
pub struct SubmitContactAction {
    messages: Arc<dyn MessageRepository>,
    mailer: Option<Arc<dyn Mailer>>,
    contact: ContactConfig,
    events: EventDispatcher,
}

impl SubmitContactAction {
    /// `mailer` is `None` when no provider is configured.
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        mailer: Option<Arc<dyn Mailer>>,
        contact: ContactConfig,
        events: EventDispatcher,
    ) -> Self {
        Self {
            messages,
            mailer,
            contact,
            events,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "submit_contact", skip_all, err)
    )]
    pub async fn execute(
        &self,
        form: &ContactForm,
        client_key: &str,
    ) -> Result<ContactOutcome, SiteError> {
        let message = form.validate(client_key)?;

        if form.is_bot() {
            log::info!(
                target: "himma::contact",
                "msg=\"honeypot filled, discarding\" client_key=\"{client_key}\""
            );
            self.events
                .dispatch(SiteEvent::ContactDiscarded {
                    client_key: client_key.to_owned(),
                    at: Utc::now(),
                })
                .await;
            return Ok(ContactOutcome::Discarded);
        }

        let (Some(to), Some(from), Some(mailer)) = (
            self.contact.to_email.as_deref(),
            self.contact.from_email.as_deref(),
            self.mailer.as_ref(),
        ) else {
            log::error!(
                target: "himma::contact",
                "msg=\"contact email is not configured\" to_set={} from_set={} mailer_set={}",
                self.contact.to_email.is_some(),
                self.contact.from_email.is_some(),
                self.mailer.is_some()
            );
            return Err(SiteError::Configuration(
                "Email service not configured.".to_owned(),
            ));
        };

        let stored = self.messages.record_contact(message).await?;

        let email = ContactEmail {
            to: to.to_owned(),
            from: from.to_owned(),
            reply_to: stored.email.clone(),
            subject: format!("New contact from {} {}", stored.first_name, stored.last_name),
            html: render_contact_html(&stored),
        };

        mailer.send(&email).await.map_err(|e| {
            log::error!(
                target: "himma::contact",
                "msg=\"contact email delivery failed\" message_id={} error=\"{e}\"",
                stored.id
            );
            SiteError::Delivery("Failed to send email".to_owned())
        })?;

        self.events
            .dispatch(SiteEvent::ContactSubmitted {
                message_id: stored.id,
                client_key: client_key.to_owned(),
                at: Utc::now(),
            })
            .await;

        Ok(ContactOutcome::Delivered(stored))
    }
}

/// Every interpolated value is escaped.
pub fn render_contact_html(message: &ContactMessage) -> String {
    let phone = message
        .phone
        .as_deref()
        .map(|p| format!("<p><strong>Phone:</strong> {}</p>", escape_html(p)))
        .unwrap_or_default();

    format!(
        concat!(
            "<div style=\"font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial,sans-serif;line-height:1.5;\">",
            "<h2>New contact message</h2>",
            "<h3>From the landing page</h3>",
            "<p><strong>Name:</strong> {first} {last}</p>",
            "<p><strong>Email:</strong> {email}</p>",
            "{phone}",
            "<p><strong>IP:</strong> {ip}</p>",
            "<hr />",
            "<p style=\"white-space:pre-wrap\">{body}</p>",
            "</div>"
        ),
        first = escape_html(&message.first_name),
        last = escape_html(&message.last_name),
        email = escape_html(&message.email),
        phone = phone,
        ip = escape_html(&message.client_key),
        body = escape_html(&message.message),
    )
}
