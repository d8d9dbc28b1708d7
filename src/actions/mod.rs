//! Site workflows.
//!
//! Each action is a small struct built from the repositories it needs and
//! run with `execute`. Handlers build one per request.

pub mod login;
pub mod save_content;
pub mod seed_admin;
pub mod submit_contact;
pub mod submit_feedback;

pub use login::{LOGIN_KEY_PREFIX, LoginAction};
pub use save_content::SaveContentAction;
pub use seed_admin::SeedAdminAction;
pub use submit_contact::{ContactForm, ContactOutcome, SubmitContactAction};
pub use submit_feedback::{FEEDBACK_KEY_PREFIX, FeedbackForm, SubmitFeedbackAction};
