use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use super::user::{AdminUser, UserRepository, normalize_email};
use crate::SiteError;

/// Admin accounts held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<AdminUser>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> SiteError {
    SiteError::Storage("user lock poisoned".to_owned())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_user_by_id(&self, id: i64) -> Result<Option<AdminUser>, SiteError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AdminUser>, SiteError> {
        let email = normalize_email(email);
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(
        &self,
        email: &str,
        hashed_password: &str,
    ) -> Result<AdminUser, SiteError> {
        let email = normalize_email(email);
        let mut users = self.users.write().map_err(|_| poisoned())?;

        if users.iter().any(|u| u.email == email) {
            return Err(SiteError::Validation("email is already registered".to_owned()));
        }

        let user = AdminUser {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            email,
            hashed_password: hashed_password.to_owned(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        drop(users);

        Ok(user)
    }

    async fn count_users(&self) -> Result<usize, SiteError> {
        Ok(self.users.read().map_err(|_| poisoned())?.len())
    }
}
