use async_trait::async_trait;

use super::locale::Locale;
use super::types::SiteContent;
use crate::SiteError;

/// Storage for per-locale site content.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Returns the stored content, or the demo content when none was saved.
    async fn get_content(&self, locale: Locale) -> Result<SiteContent, SiteError>;

    /// Replaces the content for `locale`.
    async fn save_content(&self, locale: Locale, content: SiteContent) -> Result<(), SiteError>;
}
