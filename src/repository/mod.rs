//! Repository traits and data types.
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`UserRepository`] | Dashboard administrators |
//! | [`MessageRepository`] | Contact messages and feedback |
//!
//! Site copy lives in [`crate::content::ContentRepository`].
//! In-memory implementations back every trait; implement the traits to
//! use a database.

mod message;
mod message_memory;
mod user;
mod user_memory;

pub use message::{ContactMessage, Feedback, MessageRepository, NewContactMessage, NewFeedback};
pub use message_memory::InMemoryMessageRepository;
pub use user::{AdminUser, UserRepository};
pub use user_memory::InMemoryUserRepository;

