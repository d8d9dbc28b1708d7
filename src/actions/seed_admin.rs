use std::sync::Arc;

use chrono::Utc;

use crate::config::{AdminSeedConfig, Environment};
use crate::crypto::PasswordHasher;
use crate::events::{EventDispatcher, SiteEvent};
use crate::validators::validate_email;
use crate::{AdminUser, SiteError, UserRepository};

pub const DEV_ADMIN_EMAIL: &str = "admin@streamline.dev";
pub const DEV_ADMIN_PASSWORD: &str = "changeme123";

/// Creates the first administrator when the user store is empty.
pub struct SeedAdminAction {
    user_repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    events: EventDispatcher,
}

impl SeedAdminAction {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        events: EventDispatcher,
    ) -> Self {
        Self {
            user_repository,
            hasher,
            events,
        }
    }

    /// Returns the created user, or `None` when an admin already exists.
    ///
    /// Development falls back to well-known credentials; production refuses
    /// to start without `ADMIN_PASSWORD`.
    pub async fn execute(
        &self,
        seed: &AdminSeedConfig,
        environment: Environment,
    ) -> Result<Option<AdminUser>, SiteError> {
        if self.user_repository.count_users().await? > 0 {
            return Ok(None);
        }

        let email = seed.email.as_deref().unwrap_or(DEV_ADMIN_EMAIL);
        validate_email(email).map_err(|e| SiteError::Configuration(format!("ADMIN_EMAIL: {e}")))?;

        let password = match (&seed.password, environment) {
            (Some(password), _) => password.expose_secret().to_owned(),
            (None, Environment::Production) => {
                return Err(SiteError::Configuration(
                    "ADMIN_PASSWORD must be set when no admin exists".to_owned(),
                ));
            }
            (None, Environment::Development) => {
                log::warn!(
                    target: "himma::auth",
                    "msg=\"ADMIN_PASSWORD is not set, seeding the development admin with a well-known password\" email=\"{email}\""
                );
                DEV_ADMIN_PASSWORD.to_owned()
            }
        };

        let hashed = self.hasher.hash(&password)?;
        let user = self.user_repository.create_user(email, &hashed).await?;

        log::info!(
            target: "himma::auth",
            "msg=\"admin user created\" user_id={} email=\"{}\"",
            user.id,
            user.email
        );
        self.events
            .dispatch(SiteEvent::AdminSeeded {
                user_id: user.id,
                email: user.email.clone(),
                at: Utc::now(),
            })
            .await;

        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SecretString;
    use crate::crypto::Argon2Hasher;
    use crate::repository::InMemoryUserRepository;

    fn action() -> (SeedAdminAction, Arc<InMemoryUserRepository>, Arc<Argon2Hasher>) {
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Argon2Hasher::default());
        (
            SeedAdminAction::new(users.clone(), hasher.clone(), EventDispatcher::new()),
            users,
            hasher,
        )
    }

    #[tokio::test]
    async fn test_development_defaults() {
        let (action, users, hasher) = action();
        let user = action
            .execute(&AdminSeedConfig::default(), Environment::Development)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.email, DEV_ADMIN_EMAIL);
        let stored = users.find_user_by_email(DEV_ADMIN_EMAIL).await.unwrap().unwrap();
        assert!(hasher.verify(DEV_ADMIN_PASSWORD, &stored.hashed_password));
    }

    #[tokio::test]
    async fn test_existing_admin_is_kept() {
        let (action, users, _) = action();
        users.create_user("owner@example.com", "h").await.unwrap();

        let seeded = action
            .execute(&AdminSeedConfig::default(), Environment::Production)
            .await
            .unwrap();
        assert!(seeded.is_none());
        assert_eq!(users.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_production_requires_password() {
        let (action, _, _) = action();
        let err = action
            .execute(&AdminSeedConfig::default(), Environment::Production)
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_configured_credentials() {
        let (action, _, hasher) = action();
        let seed = AdminSeedConfig {
            email: Some("boss@example.com".to_owned()),
            password: Some(SecretString::new("a-long-admin-password")),
        };
        let user = action
            .execute(&seed, Environment::Production)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.email, "boss@example.com");
        assert!(hasher.verify("a-long-admin-password", &user.hashed_password));
    }
}
