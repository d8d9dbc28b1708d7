//! Site events.
//!
//! Actions report what happened through an [`EventDispatcher`] they are
//! constructed with. A dispatcher without listeners ignores events.
//!
//! ```rust,ignore
//! use himma::events::{EventDispatcher, listeners::LoggingListener};
//!
//! let events = EventDispatcher::new().listen(LoggingListener::new());
//! ```

mod dispatcher;
mod event;
mod listener;

pub mod listeners;

pub use dispatcher::EventDispatcher;
pub use event::SiteEvent;
pub use listener::Listener;
