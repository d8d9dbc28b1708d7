//! Per-locale site copy.
//!
//! The public site reads a [`SiteContent`] document for the visitor's
//! [`Locale`]; the dashboard replaces it through [`ContentRepository::save_content`].

mod demo;
mod file_store;
mod locale;
mod memory_store;
mod repository;
mod types;

pub use demo::demo_content;
pub use file_store::FileContentRepository;
pub use locale::Locale;
pub use memory_store::InMemoryContentRepository;
pub use repository::ContentRepository;
pub use types::{
    Feature, FooterLink, ItemId, KNOWN_ICONS, NavLink, PreviousWork, SiteContent, SiteSettings,
    SocialLinks, Testimonial,
};
