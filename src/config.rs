//! Runtime configuration.
//!
//! Every setting has a development default so `cargo run` works with an
//! empty environment. Outside development the signing secret is mandatory
//! and must be strong; startup fails otherwise.
//!
//! # Example
//!
//! ```rust
//! use himma::config::{RateLimitConfig, SiteConfig};
//! use chrono::Duration;
//!
//! let config = SiteConfig {
//!     rate_limit: RateLimitConfig {
//!         max_requests: 10,
//!         window: Duration::seconds(30),
//!         ..Default::default()
//!     },
//!     ..SiteConfig::development()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use chrono::Duration;

use crate::SecretString;
use crate::SiteError;
use crate::rate_limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MS, Limit};
use crate::session::{DEFAULT_SESSION_TTL_SECS, SessionConfig};

/// Signing secret used when `AUTH_SECRET` is unset in development.
///
/// Anyone who reads this file can forge sessions with it.
pub const DEV_AUTH_SECRET: &str = "himma-development-only-secret-change-me";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

const DEFAULT_SWEEP_SECS: i64 = 300;

/// Upper bound for `SESSION_TTL_SECS`: ten years.
pub const MAX_SESSION_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Upper bound for `RATE_LIMIT_WINDOW_SECS` and `RATE_LIMIT_SWEEP_SECS`: one year.
pub const MAX_RATE_LIMIT_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = SiteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "dev" | "development" | "local" => Ok(Self::Development),
            "prod" | "production" => Ok(Self::Production),
            other => Err(SiteError::Configuration(format!(
                "APP_ENV must be development or production, got {other:?}"
            ))),
        }
    }
}

/// Limits for public submission endpoints.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Default: 5
    pub max_requests: u32,

    /// Default: 60 seconds
    pub window: Duration,

    /// How often stale buckets are swept.
    ///
    /// Default: 5 minutes
    pub sweep_interval: Duration,

    /// How long a bucket survives after its window ends.
    pub sweep_grace: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: Duration::milliseconds(DEFAULT_WINDOW_MS),
            sweep_interval: Duration::seconds(DEFAULT_SWEEP_SECS),
            sweep_grace: Duration::milliseconds(DEFAULT_WINDOW_MS),
        }
    }
}

impl RateLimitConfig {
    pub fn limit(&self) -> Limit {
        Limit::new(self.max_requests, self.window)
    }
}

/// Where contact submissions are delivered.
///
/// Delivery is possible only when all three values are present.
#[derive(Debug, Clone, Default)]
pub struct ContactConfig {
    pub to_email: Option<String>,
    pub from_email: Option<String>,
    pub resend_api_key: Option<SecretString>,
}

impl ContactConfig {
    pub fn is_configured(&self) -> bool {
        self.to_email.is_some() && self.from_email.is_some() && self.resend_api_key.is_some()
    }
}

/// Credentials for the admin created on first start.
#[derive(Debug, Clone, Default)]
pub struct AdminSeedConfig {
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub environment: Environment,
    pub bind_addr: String,
    pub session: SessionConfig,
    pub rate_limit: RateLimitConfig,
    pub contact: ContactConfig,
    /// File-backed content when set, in-memory demo content otherwise.
    pub content_dir: Option<PathBuf>,
    pub admin: AdminSeedConfig,
    /// Empty means permissive in development and same-origin only in production.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl SiteConfig {
    /// Local defaults: development secret, cookies without `Secure`.
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            session: SessionConfig {
                cookie_secure: false,
                secret_key: SecretString::new(DEV_AUTH_SECRET),
                ..Default::default()
            },
            rate_limit: RateLimitConfig::default(),
            contact: ContactConfig::default(),
            content_dir: None,
            admin: AdminSeedConfig::default(),
            cors_allowed_origins: Vec::new(),
        }
    }

    /// Production defaults around a caller-supplied secret.
    pub fn production(secret: impl Into<SecretString>) -> Self {
        Self {
            environment: Environment::Production,
            session: SessionConfig {
                cookie_secure: true,
                secret_key: secret.into(),
                ..Default::default()
            },
            ..Self::development()
        }
    }

    /// Reads the process environment.
    pub fn from_env() -> Result<Self, SiteError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key-value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SiteError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let environment = match get("APP_ENV") {
            Some(value) => value.parse()?,
            None => Environment::Development,
        };

        let secret_key = match get("AUTH_SECRET") {
            Some(secret) => SecretString::new(secret),
            None if environment.is_production() => {
                return Err(SiteError::Configuration(
                    "AUTH_SECRET must be set outside development".to_owned(),
                ));
            }
            None => {
                log::warn!(
                    target: "himma::config",
                    "msg=\"AUTH_SECRET is not set, using the development secret; sessions can be forged by anyone who has read the source\""
                );
                SecretString::new(DEV_AUTH_SECRET)
            }
        };

        let ttl_secs = parse_var(&get, "SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;
        let max_requests = parse_var(&get, "RATE_LIMIT_MAX", DEFAULT_MAX_REQUESTS)?;
        let window_secs = parse_var(&get, "RATE_LIMIT_WINDOW_SECS", DEFAULT_WINDOW_MS / 1000)?;
        let sweep_secs = parse_var(&get, "RATE_LIMIT_SWEEP_SECS", DEFAULT_SWEEP_SECS)?;

        let config = Self {
            environment,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            session: SessionConfig {
                cookie_secure: environment.is_production(),
                session_lifetime: seconds_var("SESSION_TTL_SECS", ttl_secs)?,
                secret_key,
                ..Default::default()
            },
            rate_limit: RateLimitConfig {
                max_requests,
                window: seconds_var("RATE_LIMIT_WINDOW_SECS", window_secs)?,
                sweep_interval: seconds_var("RATE_LIMIT_SWEEP_SECS", sweep_secs)?,
                sweep_grace: seconds_var("RATE_LIMIT_WINDOW_SECS", window_secs)?,
            },
            contact: ContactConfig {
                to_email: get("CONTACT_TO_EMAIL"),
                from_email: get("CONTACT_FROM_EMAIL"),
                resend_api_key: get("RESEND_API_KEY").map(SecretString::new),
            },
            content_dir: get("CONTENT_DIR").map(PathBuf::from),
            admin: AdminSeedConfig {
                email: get("ADMIN_EMAIL"),
                password: get("ADMIN_PASSWORD").map(SecretString::new),
            },
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(ToOwned::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        let invalid = |msg: &str| Err(SiteError::Configuration(msg.to_owned()));

        if self.session.session_lifetime <= Duration::zero() {
            return invalid("SESSION_TTL_SECS must be positive");
        }
        if self.session.session_lifetime > Duration::seconds(MAX_SESSION_TTL_SECS) {
            return invalid("SESSION_TTL_SECS must be at most ten years");
        }
        if self.rate_limit.max_requests == 0 {
            return invalid("RATE_LIMIT_MAX must be at least 1");
        }
        if self.rate_limit.window <= Duration::zero() {
            return invalid("RATE_LIMIT_WINDOW_SECS must be positive");
        }
        if self.rate_limit.window > Duration::seconds(MAX_RATE_LIMIT_SECS) {
            return invalid("RATE_LIMIT_WINDOW_SECS must be at most one year");
        }
        if self.rate_limit.sweep_interval <= Duration::zero() {
            return invalid("RATE_LIMIT_SWEEP_SECS must be positive");
        }
        if self.rate_limit.sweep_interval > Duration::seconds(MAX_RATE_LIMIT_SECS) {
            return invalid("RATE_LIMIT_SWEEP_SECS must be at most one year");
        }

        if self.environment.is_production() {
            if let Err(msg) = self.session.validate() {
                return invalid(msg);
            }
            if self.session.secret_key.expose_secret() == DEV_AUTH_SECRET {
                return invalid("AUTH_SECRET must not be the development secret");
            }
        } else if self.session.secret_key.len() < crate::session::MIN_SECRET_LENGTH {
            log::warn!(
                target: "himma::config",
                "msg=\"AUTH_SECRET is shorter than recommended\" length={}",
                self.session.secret_key.len()
            );
        }

        Ok(())
    }
}

fn parse_var<T, G>(get: &G, key: &str, default: T) -> Result<T, SiteError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| SiteError::Configuration(format!("{key} is not a valid number: {raw:?}"))),
        None => Ok(default),
    }
}

fn seconds_var(key: &str, secs: i64) -> Result<Duration, SiteError> {
    Duration::try_seconds(secs)
        .ok_or_else(|| SiteError::Configuration(format!("{key} is out of range: {secs}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const STRONG: &str = "0123456789abcdef0123456789abcdef-prod";

    #[test]
    fn test_empty_environment_is_development() {
        let config = SiteConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.session.secret_key.expose_secret(), DEV_AUTH_SECRET);
        assert!(!config.session.cookie_secure);
        assert_eq!(config.session.max_age_secs(), 604_800);
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window, Duration::seconds(60));
        assert_eq!(config.rate_limit.sweep_interval, Duration::seconds(300));
        assert!(!config.contact.is_configured());
        assert!(config.content_dir.is_none());
    }

    #[test]
    fn test_production_requires_secret() {
        let err = SiteConfig::from_lookup(lookup(&[("APP_ENV", "production")])).unwrap_err();
        assert!(matches!(err, SiteError::Configuration(msg) if msg.contains("AUTH_SECRET")));
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let result = SiteConfig::from_lookup(lookup(&[
            ("APP_ENV", "production"),
            ("AUTH_SECRET", "too-short"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_production_rejects_development_secret() {
        let result = SiteConfig::from_lookup(lookup(&[
            ("APP_ENV", "production"),
            ("AUTH_SECRET", DEV_AUTH_SECRET),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_production_with_strong_secret() {
        let config = SiteConfig::from_lookup(lookup(&[
            ("APP_ENV", "production"),
            ("AUTH_SECRET", STRONG),
            ("BIND_ADDR", "0.0.0.0:8080"),
        ]))
        .unwrap();

        assert!(config.environment.is_production());
        assert!(config.session.cookie_secure);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_unknown_environment_is_an_error() {
        assert!(SiteConfig::from_lookup(lookup(&[("APP_ENV", "prodution")])).is_err());
    }

    #[test]
    fn test_numeric_overrides() {
        let config = SiteConfig::from_lookup(lookup(&[
            ("SESSION_TTL_SECS", "3600"),
            ("RATE_LIMIT_MAX", "10"),
            ("RATE_LIMIT_WINDOW_SECS", "30"),
            ("RATE_LIMIT_SWEEP_SECS", "120"),
        ]))
        .unwrap();

        assert_eq!(config.session.max_age_secs(), 3600);
        assert_eq!(config.rate_limit.limit(), Limit::new(10, Duration::seconds(30)));
        assert_eq!(config.rate_limit.sweep_interval, Duration::seconds(120));
    }

    #[test]
    fn test_bad_numbers_and_zero_values_are_rejected() {
        assert!(SiteConfig::from_lookup(lookup(&[("RATE_LIMIT_MAX", "five")])).is_err());
        assert!(SiteConfig::from_lookup(lookup(&[("RATE_LIMIT_MAX", "0")])).is_err());
        assert!(SiteConfig::from_lookup(lookup(&[("SESSION_TTL_SECS", "0")])).is_err());
        assert!(SiteConfig::from_lookup(lookup(&[("RATE_LIMIT_WINDOW_SECS", "-1")])).is_err());
    }

    #[test]
    fn test_oversized_durations_are_rejected() {
        let err = SiteConfig::from_lookup(lookup(&[("SESSION_TTL_SECS", "10000000000000000")]))
            .unwrap_err();
        assert!(matches!(err, SiteError::Configuration(msg) if msg.contains("SESSION_TTL_SECS")));

        let err = SiteConfig::from_lookup(lookup(&[("RATE_LIMIT_WINDOW_SECS", "10000000000000")]))
            .unwrap_err();
        assert!(
            matches!(err, SiteError::Configuration(msg) if msg.contains("RATE_LIMIT_WINDOW_SECS"))
        );

        let err = SiteConfig::from_lookup(lookup(&[("RATE_LIMIT_SWEEP_SECS", "31536001")]))
            .unwrap_err();
        assert!(matches!(err, SiteError::Configuration(msg) if msg.contains("RATE_LIMIT_SWEEP_SECS")));
    }

    #[test]
    fn test_duration_bounds_are_inclusive() {
        let config = SiteConfig::from_lookup(lookup(&[
            ("SESSION_TTL_SECS", "315360000"),
            ("RATE_LIMIT_WINDOW_SECS", "31536000"),
        ]))
        .unwrap();
        assert_eq!(config.session.max_age_secs(), MAX_SESSION_TTL_SECS);
        assert_eq!(config.rate_limit.window, Duration::seconds(MAX_RATE_LIMIT_SECS));
    }

    #[test]
    fn test_contact_and_cors() {
        let config = SiteConfig::from_lookup(lookup(&[
            ("CONTACT_TO_EMAIL", "team@example.com"),
            ("CONTACT_FROM_EMAIL", "site@example.com"),
            ("RESEND_API_KEY", "re_123"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            ("CONTENT_DIR", "/var/lib/himma"),
        ]))
        .unwrap();

        assert!(config.contact.is_configured());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.content_dir, Some(PathBuf::from("/var/lib/himma")));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = SiteConfig::from_lookup(lookup(&[
            ("RESEND_API_KEY", "   "),
            ("AUTH_SECRET", ""),
        ]))
        .unwrap();
        assert!(config.contact.resend_api_key.is_none());
        assert_eq!(config.session.secret_key.expose_secret(), DEV_AUTH_SECRET);
    }

    #[test]
    fn test_presets_validate() {
        assert!(SiteConfig::development().validate().is_ok());
        assert!(SiteConfig::production(STRONG).validate().is_ok());
        assert!(SiteConfig::production("short").validate().is_err());
    }
}
