use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::demo::demo_content;
use super::locale::Locale;
use super::repository::ContentRepository;
use super::types::SiteContent;
use crate::SiteError;

/// Content held in process memory, lost on restart.
#[derive(Debug)]
pub struct InMemoryContentRepository {
    content: RwLock<HashMap<Locale, SiteContent>>,
}

impl Default for InMemoryContentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContentRepository {
    /// Seeded with the demo content for every locale.
    pub fn new() -> Self {
        let content = Locale::ALL
            .into_iter()
            .map(|locale| (locale, demo_content(locale)))
            .collect();
        Self {
            content: RwLock::new(content),
        }
    }
}

fn poisoned() -> SiteError {
    SiteError::Storage("content lock poisoned".to_owned())
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn get_content(&self, locale: Locale) -> Result<SiteContent, SiteError> {
        let content = self.content.read().map_err(|_| poisoned())?;
        Ok(content
            .get(&locale)
            .cloned()
            .unwrap_or_else(|| demo_content(locale)))
    }

    async fn save_content(&self, locale: Locale, content: SiteContent) -> Result<(), SiteError> {
        self.content
            .write()
            .map_err(|_| poisoned())?
            .insert(locale, content);
        Ok(())
    }
}
