//! Security-focused test suite.
//!
//! Covers password storage, session token integrity, secret handling and the
//! fail-closed behaviour of configuration and throttling.
//! Run with: `cargo test --test security`

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use hmac::{Hmac, Mac};
use himma::config::{DEV_AUTH_SECRET, SiteConfig};
use himma::crypto::{Argon2Hasher, PasswordHasher};
use himma::mail::escape_html;
use himma::rate_limit::{Limit, RateLimiter};
use himma::{ManualClock, SecretString, SessionSigner, SiteError};
use sha2::Sha256;

const SECRET: &str = "0123456789abcdef0123456789abcdef";

fn signer_at(clock: &ManualClock) -> SessionSigner {
    SessionSigner::new(SecretString::new(SECRET)).with_clock(Arc::new(clock.clone()))
}

// =============================================================================
// Password Security Tests
// =============================================================================

#[test]
fn argon2_produces_different_hashes_for_same_password() {
    let hasher = Argon2Hasher::default();
    let password = "changeme123";

    let hash1 = hasher.hash(password).unwrap();
    let hash2 = hasher.hash(password).unwrap();

    assert_ne!(hash1, hash2);
    assert!(hash1.starts_with("$argon2id$"));
    assert!(hasher.verify(password, &hash1));
    assert!(hasher.verify(password, &hash2));
}

#[test]
fn argon2_rejects_wrong_password_and_garbage_hash() {
    let hasher = Argon2Hasher::default();
    let hash = hasher.hash("correct password").unwrap();

    assert!(!hasher.verify("wrong password", &hash));
    assert!(!hasher.verify("correct password", "not-a-phc-string"));
    assert!(!hasher.verify("correct password", ""));
}

#[test]
fn argon2_presets_cross_verify() {
    let production = Argon2Hasher::production();
    let hash = production.hash("testpassword").unwrap();

    assert!(Argon2Hasher::default().verify("testpassword", &hash));
}

// =============================================================================
// Secret Handling Tests
// =============================================================================

#[test]
fn secret_string_redacts_in_debug_and_display() {
    let secret = SecretString::new("super-secret-value");

    assert!(!format!("{secret:?}").contains("super-secret-value"));
    assert_eq!(format!("{secret}"), "[REDACTED]");
    assert_eq!(secret.expose_secret(), "super-secret-value");
}

#[test]
fn config_debug_never_prints_signing_secret() {
    let config = SiteConfig::production(SECRET);
    assert!(!format!("{config:?}").contains(SECRET));
}

#[test]
fn signer_debug_never_prints_secret() {
    let signer = SessionSigner::new(SecretString::new(SECRET));
    assert!(!format!("{signer:?}").contains(SECRET));
}

// =============================================================================
// Session Token Tests
// =============================================================================

#[test]
fn session_tokens_from_another_secret_are_rejected() {
    let token = SessionSigner::new(SecretString::new("another-secret-another-secret-xx"))
        .issue(1, "admin@example.com");

    assert!(SessionSigner::new(SecretString::new(SECRET)).verify(Some(&token)).is_none());
}

#[test]
fn session_payload_tampering_is_rejected() {
    let signer = SessionSigner::new(SecretString::new(SECRET));
    let token = signer.issue(1, "admin@example.com");
    let (_, signature) = token.split_once('.').unwrap();

    let forged_payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({"uid": 2, "email": "admin@example.com", "exp": i64::MAX}).to_string(),
    );
    let forged = format!("{forged_payload}.{signature}");

    assert!(signer.verify(Some(&forged)).is_none());
}

#[test]
fn session_signature_tampering_is_rejected() {
    let signer = SessionSigner::new(SecretString::new(SECRET));
    let token = signer.issue(1, "admin@example.com");

    let mut bytes = token.into_bytes();
    let last = bytes.len() - 1;
    bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    assert!(signer.verify(Some(&tampered)).is_none());
}

#[test]
fn session_tokens_with_extra_segments_are_rejected() {
    let signer = SessionSigner::new(SecretString::new(SECRET));
    let token = signer.issue(1, "admin@example.com");

    assert!(signer.verify(Some(&format!("{token}.extra"))).is_none());
    assert!(signer.verify(Some("")).is_none());
    assert!(signer.verify(Some("no-separator")).is_none());
    assert!(signer.verify(None).is_none());
}

#[test]
fn session_expires_exactly_at_exp() {
    let clock = ManualClock::starting_now();
    let signer = signer_at(&clock);
    let token = signer.issue_with_ttl(1, "admin@example.com", 60);

    clock.advance(Duration::seconds(59));
    assert!(signer.verify(Some(&token)).is_some());

    clock.advance(Duration::seconds(1));
    assert!(signer.verify(Some(&token)).is_none());
}

/// Signs arbitrary claims the same way the signer does.
fn sign_claims(claims: &serde_json::Value) -> String {
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(SECRET.as_bytes()).unwrap();
    mac.update(payload.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    format!("{payload}.{signature}")
}

#[test]
fn session_without_expiry_is_rejected() {
    let signer = SessionSigner::new(SecretString::new(SECRET));

    let future = chrono::Utc::now().timestamp() + 3600;
    let control = sign_claims(&serde_json::json!({"uid": 1, "email": "a@b.co", "exp": future}));
    assert!(signer.verify(Some(&control)).is_some());

    let missing = sign_claims(&serde_json::json!({"uid": 1, "email": "a@b.co"}));
    let zero = sign_claims(&serde_json::json!({"uid": 1, "email": "a@b.co", "exp": 0}));
    assert!(signer.verify(Some(&missing)).is_none());
    assert!(signer.verify(Some(&zero)).is_none());
}

// =============================================================================
// Configuration Tests
// =============================================================================

fn lookup(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key: &str| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_owned())
    }
}

#[test]
fn production_requires_a_strong_secret() {
    let missing = SiteConfig::from_lookup(lookup(&[("APP_ENV", "production")]));
    assert!(matches!(missing, Err(SiteError::Configuration(_))));

    let short = SiteConfig::from_lookup(lookup(&[
        ("APP_ENV", "production"),
        ("AUTH_SECRET", "short"),
    ]));
    assert!(matches!(short, Err(SiteError::Configuration(_))));

    let dev_secret = SiteConfig::production(DEV_AUTH_SECRET);
    assert!(dev_secret.validate().is_err());

    let strong = SiteConfig::from_lookup(lookup(&[
        ("APP_ENV", "production"),
        ("AUTH_SECRET", SECRET),
    ]))
    .unwrap();
    assert!(strong.session.cookie_secure);
}

// =============================================================================
// Output Escaping and Throttling Tests
// =============================================================================

#[test]
fn html_escaping_neutralizes_markup() {
    assert_eq!(
        escape_html(r#"<script>alert("x")</script> & 'y'"#),
        "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#039;y&#039;"
    );
}

#[tokio::test]
async fn throttling_applies_per_key_under_concurrency() {
    let limiter = RateLimiter::in_memory(Limit::per_minute(5));

    let mut handles = Vec::new();
    for _ in 0..20 {
        let limiter = limiter.clone();
        handles.push(tokio::spawn(async move { limiter.allow("203.0.113.7").await }));
    }

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 5);
    assert!(limiter.allow("198.51.100.1").await);
}
