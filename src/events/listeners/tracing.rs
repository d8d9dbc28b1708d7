use async_trait::async_trait;

use crate::events::{Listener, SiteEvent};

/// Emits events as `tracing` events. Requires the `tracing` feature.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &SiteEvent) {
        tracing::info!(
            target: "himma::events",
            event_name = event.name(),
            ?event,
            "site event"
        );
    }
}
