#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ContactEmail, Mailer};
use crate::SiteError;

/// Records messages in memory; can be switched to fail every send.
#[derive(Debug, Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<ContactEmail>>>,
    fail: Arc<AtomicBool>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.set_failing(true);
        mailer
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<ContactEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: &ContactEmail) -> Result<(), SiteError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SiteError::Delivery("mock failure".to_owned()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
