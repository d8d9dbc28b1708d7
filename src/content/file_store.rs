//! File-based content storage.
//!
//! Stores each locale's content as a pretty-printed JSON file.

use std::path::PathBuf;

use async_trait::async_trait;

use super::demo::demo_content;
use super::locale::Locale;
use super::repository::ContentRepository;
use super::types::SiteContent;
use crate::SiteError;

/// File-based content storage.
///
/// Content for a locale lives in `{directory}/content.{locale}.json`.
/// A missing file reads as the demo content.
///
/// ```rust,ignore
/// use himma::content::FileContentRepository;
///
/// let repo = FileContentRepository::new("/var/lib/himma")?;
/// ```
#[derive(Debug)]
pub struct FileContentRepository {
    directory: PathBuf,
}

impl FileContentRepository {
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, SiteError> {
        let dir = directory.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            SiteError::Storage(format!("Failed to create content directory: {e}"))
        })?;
        Ok(Self { directory: dir })
    }

    fn content_path(&self, locale: Locale) -> PathBuf {
        self.directory.join(format!("content.{locale}.json"))
    }

    fn read_content(&self, locale: Locale) -> Result<Option<SiteContent>, SiteError> {
        let path = self.content_path(locale);

        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&path)
            .map_err(|e| SiteError::Storage(format!("Failed to read content file: {e}")))?;

        let content: SiteContent = serde_json::from_str(&raw)
            .map_err(|e| SiteError::Storage(format!("Failed to parse content file: {e}")))?;

        Ok(Some(content))
    }

    /// Writes through a temporary file so readers never see a partial document.
    ///
    /// Each write gets its own temporary name; concurrent saves for one locale
    /// race only on the final rename, and the last one wins.
    fn write_content(&self, locale: Locale, content: &SiteContent) -> Result<(), SiteError> {
        let path = self.content_path(locale);
        let tmp = self
            .directory
            .join(format!("content.{locale}.{:016x}.tmp", rand::random::<u64>()));

        let raw = serde_json::to_string_pretty(content)
            .map_err(|e| SiteError::Storage(format!("Failed to serialize content: {e}")))?;

        std::fs::write(&tmp, raw)
            .map_err(|e| SiteError::Storage(format!("Failed to write content file: {e}")))?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(SiteError::Storage(format!(
                "Failed to replace content file: {e}"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ContentRepository for FileContentRepository {
    async fn get_content(&self, locale: Locale) -> Result<SiteContent, SiteError> {
        Ok(self
            .read_content(locale)?
            .unwrap_or_else(|| demo_content(locale)))
    }

    async fn save_content(&self, locale: Locale, content: SiteContent) -> Result<(), SiteError> {
        self.write_content(locale, &content)?;
        log::info!(
            target: "himma::content",
            "msg=\"content saved\" locale=\"{locale}\" path=\"{}\"",
            self.content_path(locale).display()
        );
        Ok(())
    }
}
