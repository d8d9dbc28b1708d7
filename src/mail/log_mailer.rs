use async_trait::async_trait;

use super::{ContactEmail, Mailer};
use crate::SiteError;

/// Writes messages to the log instead of sending them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &ContactEmail) -> Result<(), SiteError> {
        log::info!(
            target: "himma::mail",
            "msg=\"email not sent, no provider configured\" to=\"{}\" reply_to=\"{}\" subject=\"{}\"",
            email.to,
            email.reply_to,
            email.subject
        );
        Ok(())
    }
}
