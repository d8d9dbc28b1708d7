use std::sync::Arc;

use chrono::Utc;

use crate::crypto::PasswordHasher;
use crate::events::{EventDispatcher, SiteEvent};
use crate::{AdminUser, SecretString, SessionSigner, SiteError, UserRepository};

/// Limiter keys for login attempts carry this prefix.
pub const LOGIN_KEY_PREFIX: &str = "login:";

/// Exchanges admin credentials for a session token.
pub struct LoginAction {
    user_repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    signer: SessionSigner,
    events: EventDispatcher,
}

impl LoginAction {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        signer: SessionSigner,
        events: EventDispatcher,
    ) -> Self {
        Self {
            user_repository,
            hasher,
            signer,
            events,
        }
    }

    /// Returns the user and a freshly issued token.
    ///
    /// Unknown email and wrong password both yield
    /// `SiteError::InvalidCredentials`. An unknown email still pays for one
    /// hash so the two cases take comparable time.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "login", skip_all, err)
    )]
    pub async fn execute(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<(AdminUser, String), SiteError> {
        let user = self.user_repository.find_user_by_email(email).await?;

        let failure = match user {
            Some(user) if self.hasher.verify(password.expose_secret(), &user.hashed_password) => {
                let token = self.signer.issue(user.id, &user.email);
                log::info!(
                    target: "himma::auth",
                    "msg=\"login succeeded\" user_id={}",
                    user.id
                );
                self.events
                    .dispatch(SiteEvent::LoginSucceeded {
                        user_id: user.id,
                        email: user.email.clone(),
                        at: Utc::now(),
                    })
                    .await;
                return Ok((user, token));
            }
            Some(_) => "bad_password",
            None => {
                let _ = self.hasher.hash(password.expose_secret());
                "unknown_user"
            }
        };

        log::info!(target: "himma::auth", "msg=\"login failed\" reason={failure}");
        self.events
            .dispatch(SiteEvent::LoginFailed {
                email: email.trim().to_owned(),
                reason: failure,
                at: Utc::now(),
            })
            .await;

        Err(SiteError::InvalidCredentials)
    }
}
