//! Site backend server.
//!
//! Reads configuration from the environment (and `.env`), seeds the admin
//! account, and serves the HTTP API until interrupted.

use std::sync::Arc;
use std::time::Duration;

use himma::actions::SeedAdminAction;
use himma::api::axum::{AppState, app};
use himma::config::SiteConfig;
use himma::content::{FileContentRepository, InMemoryContentRepository};
use himma::crypto::{Argon2Hasher, PasswordHasher};
use himma::events::EventDispatcher;
use himma::events::listeners::LoggingListener;
use himma::mail::{LogMailer, Mailer, ResendMailer};
use himma::rate_limit::{InMemoryStore, RateLimiter};
use himma::{ContentRepository, SessionSigner};
use tracing_subscriber::EnvFilter;

const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = SiteConfig::from_env()?;
    log::info!(
        target: "himma",
        "msg=\"starting\" environment={} bind_addr={}",
        config.environment.as_str(),
        config.bind_addr
    );

    let events = EventDispatcher::new().listen(LoggingListener::new());
    #[cfg(feature = "tracing")]
    let events = events.listen(himma::events::listeners::TracingListener);

    let hasher: Arc<dyn PasswordHasher> = if config.environment.is_production() {
        Arc::new(Argon2Hasher::production())
    } else {
        Arc::new(Argon2Hasher::default())
    };

    let content: Arc<dyn ContentRepository> = match &config.content_dir {
        Some(dir) => Arc::new(FileContentRepository::new(dir)?),
        None => Arc::new(InMemoryContentRepository::new()),
    };

    let store = Arc::new(InMemoryStore::new());
    let limiter = RateLimiter::new(store.clone(), config.rate_limit.limit());

    let signer = SessionSigner::new(config.session.secret_key.clone())
        .with_default_ttl(config.session.max_age_secs());

    let mut state = AppState::in_memory(&config)
        .with_signer(signer)
        .with_limiter(limiter)
        .with_hasher(hasher)
        .with_content(content)
        .with_events(events);

    if let Some(mailer) = select_mailer(&config) {
        state = state.with_mailer(mailer);
    }

    SeedAdminAction::new(state.users.clone(), state.hasher.clone(), state.events.clone())
        .execute(&config.admin, config.environment)
        .await?;

    spawn_sweeper(
        store,
        config
            .rate_limit
            .sweep_interval
            .to_std()
            .unwrap_or(DEFAULT_SWEEP_INTERVAL),
        config.rate_limit.sweep_grace,
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!(target: "himma", "msg=\"listening\" addr={}", listener.local_addr()?);

    axum::serve(listener, app(state, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!(target: "himma", "msg=\"shut down\"");
    Ok(())
}

/// `RUST_LOG` filters (default `info`); `LOG_FORMAT=json` switches to JSON lines.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Resend when a key is set; the log mailer in development; nothing otherwise.
fn select_mailer(config: &SiteConfig) -> Option<Arc<dyn Mailer>> {
    match &config.contact.resend_api_key {
        Some(key) => Some(Arc::new(ResendMailer::new(key.clone()))),
        None if !config.environment.is_production() => {
            log::warn!(
                target: "himma::contact",
                "msg=\"RESEND_API_KEY is not set, contact emails will only be logged\""
            );
            Some(Arc::new(LogMailer))
        }
        None => {
            log::warn!(
                target: "himma::contact",
                "msg=\"RESEND_API_KEY is not set, contact submissions will fail\""
            );
            None
        }
    }
}

fn spawn_sweeper(store: Arc<InMemoryStore>, every: Duration, grace: chrono::Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = store.sweep_expired(chrono::Utc::now(), grace);
            if removed > 0 {
                log::debug!(
                    target: "himma::rate_limit",
                    "msg=\"swept expired buckets\" removed={removed}"
                );
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!(target: "himma", "msg=\"failed to listen for shutdown signal\" error=\"{e}\"");
    }
}
