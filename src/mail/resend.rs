use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{ContactEmail, Mailer};
use crate::{SecretString, SiteError};

pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Delivers mail through the Resend HTTP API.
pub struct ResendMailer {
    client: Client,
    api_key: SecretString,
    endpoint: String,
}

impl std::fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendMailer")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ResendMailer {
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            api_key,
            endpoint: RESEND_ENDPOINT.to_owned(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &ContactEmail) -> Result<(), SiteError> {
        let body = SendRequest {
            from: &email.from,
            to: [&email.to],
            reply_to: &email.reply_to,
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| SiteError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            log::error!(
                target: "himma::mail",
                "msg=\"email provider rejected message\" status={} detail=\"{}\"",
                status.as_u16(),
                detail.chars().take(200).collect::<String>()
            );
            return Err(SiteError::Delivery(format!(
                "provider returned {}",
                status.as_u16()
            )));
        }

        log::debug!(target: "himma::mail", "msg=\"email sent\" subject=\"{}\"", email.subject);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = SendRequest {
            from: "site@example.com",
            to: ["team@example.com"],
            reply_to: "jane@example.com",
            subject: "New contact from Jane Doe",
            html: "<p>hi</p>",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["to"][0], "team@example.com");
        assert_eq!(json["reply_to"], "jane@example.com");
    }

    #[test]
    fn test_debug_hides_key() {
        let mailer = ResendMailer::new(SecretString::new("re_live_key"));
        assert!(!format!("{mailer:?}").contains("re_live_key"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_delivery_error() {
        let mailer = ResendMailer::new(SecretString::new("k")).with_endpoint("http://127.0.0.1:9/emails");
        let email = ContactEmail {
            to: "a@example.com".to_owned(),
            from: "b@example.com".to_owned(),
            reply_to: "c@example.com".to_owned(),
            subject: "s".to_owned(),
            html: String::new(),
        };
        assert!(matches!(mailer.send(&email).await, Err(SiteError::Delivery(_))));
    }
}
