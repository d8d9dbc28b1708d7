pub mod content;
pub mod email;
pub mod text;

pub use content::validate_site_content;
pub use email::validate_email;
pub use text::{validate_max_chars, validate_min_chars, validate_rating, validate_required};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    EmailEmpty,
    EmailTooLong,
    EmailInvalidFormat,
    Required { field: String },
    TooShort { field: String, min: usize },
    TooLong { field: String, max: usize },
    RatingOutOfRange,
    UnknownIcon { field: String, icon: String },
}

impl ValidationError {
    /// The input field the error belongs to.
    pub fn field(&self) -> &str {
        match self {
            Self::EmailEmpty | Self::EmailTooLong | Self::EmailInvalidFormat => "email",
            Self::Required { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::UnknownIcon { field, .. } => field,
            Self::RatingOutOfRange => "rating",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailEmpty => write!(f, "Email cannot be empty"),
            Self::EmailTooLong => write!(f, "Email is too long (max 254 characters)"),
            Self::EmailInvalidFormat => write!(f, "Invalid email format"),
            Self::Required { field } => write!(f, "{field} cannot be empty"),
            Self::TooShort { field, min } => {
                write!(f, "{field} must be at least {min} characters")
            }
            Self::TooLong { field, max } => {
                write!(f, "{field} is too long (max {max} characters)")
            }
            Self::RatingOutOfRange => write!(f, "rating must be between 1 and 5"),
            Self::UnknownIcon { field, icon } => write!(f, "{field} uses unknown icon {icon:?}"),
        }
    }
}

impl std::error::Error for ValidationError {}
