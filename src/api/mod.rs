//! HTTP surface.

mod types;

pub use types::*;

pub mod axum;
