use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SiteError;

/// A dashboard administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(any(test, feature = "mocks"))]
impl AdminUser {
    pub fn mock_from_credentials(email: &str, hashed_password: &str) -> Self {
        AdminUser {
            id: 1,
            email: email.to_owned(),
            hashed_password: hashed_password.to_owned(),
            created_at: Utc::now(),
        }
    }
}

/// Emails are compared trimmed and case-insensitively.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, id: i64) -> Result<Option<AdminUser>, SiteError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AdminUser>, SiteError>;
    async fn create_user(&self, email: &str, hashed_password: &str)
    -> Result<AdminUser, SiteError>;
    async fn count_users(&self) -> Result<usize, SiteError>;
}
