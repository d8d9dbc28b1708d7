use async_trait::async_trait;

use super::SiteEvent;

/// Receives every dispatched event. Filter by matching on the variant.
///
/// ```rust,ignore
/// use himma::events::{Listener, SiteEvent};
/// use async_trait::async_trait;
///
/// struct AlertOnThrottle;
///
/// #[async_trait]
/// impl Listener for AlertOnThrottle {
///     async fn handle(&self, event: &SiteEvent) {
///         if let SiteEvent::RequestThrottled { client_key, .. } = event {
///             // page someone
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &SiteEvent);
}
