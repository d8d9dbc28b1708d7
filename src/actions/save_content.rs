use std::sync::Arc;

use chrono::Utc;

use crate::events::{EventDispatcher, SiteEvent};
use crate::validators::validate_site_content;
use crate::{ContentRepository, Locale, SiteContent, SiteError};

/// Replaces a locale's site content on behalf of an administrator.
pub struct SaveContentAction {
    content_repository: Arc<dyn ContentRepository>,
    events: EventDispatcher,
}

impl SaveContentAction {
    pub fn new(content_repository: Arc<dyn ContentRepository>, events: EventDispatcher) -> Self {
        Self {
            content_repository,
            events,
        }
    }

    /// Validates, normalizes ordering and stores. Returns what was stored.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "save_content", skip(self, content), err)
    )]
    pub async fn execute(
        &self,
        locale: Locale,
        content: SiteContent,
        user_id: i64,
    ) -> Result<SiteContent, SiteError> {
        validate_site_content(&content)?;
        let content = content.normalized();

        self.content_repository
            .save_content(locale, content.clone())
            .await?;

        self.events
            .dispatch(SiteEvent::ContentSaved {
                locale,
                user_id,
                at: Utc::now(),
            })
            .await;

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Feature, InMemoryContentRepository, demo_content};

    fn action() -> (SaveContentAction, Arc<InMemoryContentRepository>) {
        let repo = Arc::new(InMemoryContentRepository::new());
        (
            SaveContentAction::new(repo.clone(), EventDispatcher::new()),
            repo,
        )
    }

    #[tokio::test]
    async fn test_save_normalizes_and_stores() {
        let (action, repo) = action();
        let mut content = demo_content(Locale::Ar);
        content.features.insert(
            0,
            Feature {
                id: None,
                title: "جديد".to_owned(),
                description: String::new(),
                icon: Some("LifeBuoy".to_owned()),
                order: Some(99),
            },
        );

        let saved = action.execute(Locale::Ar, content, 1).await.unwrap();
        assert_eq!(saved.features.last().map(|f| f.title.as_str()), Some("جديد"));
        assert_eq!(repo.get_content(Locale::Ar).await.unwrap(), saved);
        assert_eq!(
            repo.get_content(Locale::En).await.unwrap(),
            demo_content(Locale::En)
        );
    }

    #[tokio::test]
    async fn test_invalid_content_is_not_stored() {
        let (action, repo) = action();
        let mut content = demo_content(Locale::En);
        content.site_settings.hero_title = String::new();

        let err = action.execute(Locale::En, content, 1).await.unwrap_err();
        assert!(matches!(err, SiteError::Validation(_)));
        assert_eq!(
            repo.get_content(Locale::En).await.unwrap(),
            demo_content(Locale::En)
        );
    }
}
