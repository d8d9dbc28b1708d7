use async_trait::async_trait;

use crate::events::{Listener, SiteEvent};

/// Logs every event through the `log` crate.
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Logs at INFO.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &SiteEvent) {
        let level = match event {
            SiteEvent::LoginFailed { .. } | SiteEvent::RequestThrottled { .. } => log::Level::Warn,
            _ => self.level,
        };
        log::log!(
            target: "himma::events",
            level,
            "event={} {:?}",
            event.name(),
            event
        );
    }
}
