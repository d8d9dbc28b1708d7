use chrono::Duration;

use super::token::DEFAULT_SESSION_TTL_SECS;
use crate::SecretString;

/// Shortest signing secret accepted outside development.
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

impl SameSite {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Lax => "Lax",
            Self::Strict => "Strict",
        }
    }
}

/// Signing key and cookie attributes for admin sessions.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    pub session_lifetime: Duration,
    pub secret_key: SecretString,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_owned(),
            cookie_path: "/".to_owned(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            session_lifetime: Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            secret_key: SecretString::new(""),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.secret_key.is_blank() {
            return Err("AUTH_SECRET must not be empty");
        }
        if self.secret_key.len() < MIN_SECRET_LENGTH {
            return Err("AUTH_SECRET should be at least 32 bytes");
        }
        if self.session_lifetime <= Duration::zero() {
            return Err("SESSION_TTL_SECS must be positive");
        }
        Ok(())
    }

    pub fn max_age_secs(&self) -> i64 {
        self.session_lifetime.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "session");
        assert_eq!(config.cookie_path, "/");
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Lax);
        assert_eq!(config.max_age_secs(), 604_800);
    }

    #[test]
    fn test_validate_rejects_empty_and_short_secrets() {
        assert!(SessionConfig::default().validate().is_err());

        let short = SessionConfig {
            secret_key: SecretString::new("short"),
            ..Default::default()
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_lifetime() {
        let config = SessionConfig {
            secret_key: SecretString::new("this-is-a-very-long-secret-key-for-testing"),
            session_lifetime: Duration::zero(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_long_secret() {
        let config = SessionConfig {
            secret_key: SecretString::new("this-is-a-very-long-secret-key-for-testing"),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
