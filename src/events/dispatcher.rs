use std::sync::Arc;

use super::{Listener, SiteEvent};

/// Fans events out to listeners in registration order.
///
/// Cheap to clone; clones share the listener list. A dispatcher with no
/// listeners drops events.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    listeners: Arc<Vec<Arc<dyn Listener>>>,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener. Clones made earlier keep their own list.
    #[must_use]
    pub fn listen(mut self, listener: impl Listener) -> Self {
        Arc::make_mut(&mut self.listeners).push(Arc::new(listener));
        self
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub async fn dispatch(&self, event: SiteEvent) {
        for listener in self.listeners.iter() {
            listener.handle(&event).await;
        }
    }
}
