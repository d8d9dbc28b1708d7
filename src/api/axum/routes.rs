use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use super::cors::cors_layer;
use super::handlers;
use crate::config::{ContactConfig, SiteConfig};
use crate::content::InMemoryContentRepository;
use crate::crypto::{Argon2Hasher, PasswordHasher};
use crate::events::EventDispatcher;
use crate::mail::Mailer;
use crate::rate_limit::RateLimiter;
use crate::repository::{InMemoryMessageRepository, InMemoryUserRepository};
use crate::session::SessionConfig;
use crate::{ContentRepository, MessageRepository, SessionSigner, UserRepository};

/// Everything a handler may need, shared behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub signer: SessionSigner,
    pub session: SessionConfig,
    pub limiter: RateLimiter,
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub content: Arc<dyn ContentRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub mailer: Option<Arc<dyn Mailer>>,
    pub contact: ContactConfig,
    pub events: EventDispatcher,
}

impl AppState {
    /// State backed entirely by in-memory stores, with no mailer.
    pub fn in_memory(config: &SiteConfig) -> Self {
        let signer = SessionSigner::new(config.session.secret_key.clone())
            .with_default_ttl(config.session.max_age_secs());

        Self {
            signer,
            session: config.session.clone(),
            limiter: RateLimiter::in_memory(config.rate_limit.limit()),
            users: Arc::new(InMemoryUserRepository::new()),
            hasher: Arc::new(Argon2Hasher::default()),
            content: Arc::new(InMemoryContentRepository::new()),
            messages: Arc::new(InMemoryMessageRepository::new()),
            mailer: None,
            contact: config.contact.clone(),
            events: EventDispatcher::new(),
        }
    }

    pub fn with_signer(mut self, signer: SessionSigner) -> Self {
        self.signer = signer;
        self
    }

    pub fn with_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn with_users(mut self, users: Arc<dyn UserRepository>) -> Self {
        self.users = users;
        self
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_content(mut self, content: Arc<dyn ContentRepository>) -> Self {
        self.content = content;
        self
    }

    pub fn with_messages(mut self, messages: Arc<dyn MessageRepository>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }
}

/// All endpoints. Admin-only handlers take an `AdminSession` extractor.
pub fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/content",
            get(handlers::get_content).put(handlers::save_content),
        )
        .route(
            "/api/contact",
            post(handlers::submit_contact).get(handlers::list_contacts),
        )
        .route(
            "/api/feedback",
            post(handlers::submit_feedback).get(handlers::list_feedback),
        )
        .route("/api/lang", post(handlers::set_lang))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/me", get(handlers::me))
        .route("/api/dashboard", get(handlers::dashboard))
}

/// The complete application with tracing and CORS applied.
pub fn app(state: AppState, config: &SiteConfig) -> Router {
    Router::new()
        .merge(site_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins, config.environment))
        .with_state(state)
}
