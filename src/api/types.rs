use serde::{Deserialize, Serialize};

use crate::repository::{ContactMessage, Feedback};
use crate::{Locale, SiteContent, SiteError};

/// Default page size for message listings.
pub const DEFAULT_LIST_LIMIT: usize = 20;
pub const MAX_LIST_LIMIT: usize = 100;

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LangRequest {
    pub locale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub locale: Option<String>,
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Requested page size, defaulted and capped.
    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT)
    }
}

// Response DTOs

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub const OK: Self = Self { ok: true };
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub ok: bool,
    pub user_id: i64,
    pub email: String,
    /// Unix seconds.
    pub expires_at: i64,
}

#[derive(Debug, Serialize)]
pub struct LangResponse {
    pub ok: bool,
    pub locale: Locale,
}

#[derive(Debug, Serialize)]
pub struct FeedbackCreatedResponse {
    pub ok: bool,
    pub feedback: Feedback,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub content: SiteContent,
    pub contacts: Vec<ContactMessage>,
    pub feedback: Vec<Feedback>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            issues: Vec::new(),
        }
    }
}

/// Client-facing body for an error. Internal detail stays in the logs.
impl From<&SiteError> for ErrorResponse {
    fn from(err: &SiteError) -> Self {
        match err {
            SiteError::InvalidCredentials => Self::new("Invalid email or password"),
            SiteError::Unauthorized => Self::new("Unauthorized"),
            SiteError::TooManyRequests => Self::new(err.to_string()),
            SiteError::Validation(issue) => Self {
                ok: false,
                error: "Invalid input".to_owned(),
                issues: vec![issue.clone()],
            },
            SiteError::Configuration(msg) | SiteError::Delivery(msg) => Self::new(msg.clone()),
            SiteError::PasswordHashError | SiteError::Storage(_) => Self::new("Unexpected error"),
        }
    }
}
