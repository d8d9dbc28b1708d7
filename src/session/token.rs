//! Issuing and verifying signed session tokens.

use std::fmt;
use std::sync::Arc;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use super::SessionPayload;
use crate::clock::{Clock, SystemClock};
use crate::SecretString;

type HmacSha256 = Hmac<Sha256>;

/// One week.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

/// Payload segments written by other encoders may carry `=` padding.
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Shape used while decoding, so a missing `exp` is distinguishable from a bad one.
#[derive(Deserialize)]
struct RawPayload {
    uid: i64,
    email: String,
    exp: Option<i64>,
}

/// Issues and verifies session tokens with HMAC-SHA256.
///
/// The signer holds no mutable state and can be shared freely.
///
/// # Example
///
/// ```rust
/// use himma::{SecretString, SessionSigner};
///
/// let signer = SessionSigner::new(SecretString::new("a-long-random-secret-from-the-environment"));
/// let token = signer.issue(1, "admin@example.com");
///
/// let payload = signer.verify(Some(&token)).unwrap();
/// assert_eq!(payload.subject_id, 1);
/// assert!(signer.verify(Some("garbage")).is_none());
/// ```
#[derive(Clone)]
pub struct SessionSigner {
    secret: SecretString,
    default_ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSigner")
            .field("secret", &"[REDACTED]")
            .field("default_ttl_secs", &self.default_ttl_secs)
            .finish_non_exhaustive()
    }
}

impl SessionSigner {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            default_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_default_ttl(mut self, ttl_secs: i64) -> Self {
        self.default_ttl_secs = ttl_secs;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn default_ttl_secs(&self) -> i64 {
        self.default_ttl_secs
    }

    /// Issues a token valid for the default TTL.
    pub fn issue(&self, subject_id: i64, subject_email: &str) -> String {
        self.issue_with_ttl(subject_id, subject_email, self.default_ttl_secs)
    }

    /// Issues a token expiring `ttl_secs` from now. A negative TTL yields a
    /// token that is already expired.
    pub fn issue_with_ttl(&self, subject_id: i64, subject_email: &str, ttl_secs: i64) -> String {
        let payload = SessionPayload {
            subject_id,
            subject_email: subject_email.to_owned(),
            expires_at: self.clock.now_secs().saturating_add(ttl_secs),
        };

        // Serializing a struct of an integer and a string cannot fail.
        let body = serde_json::to_vec(&payload).unwrap_or_default();
        let payload_b64 = URL_SAFE_NO_PAD.encode(body);
        let signature_b64 = URL_SAFE_NO_PAD.encode(self.sign(payload_b64.as_bytes()));

        format!("{payload_b64}.{signature_b64}")
    }

    /// Verifies a token, returning its payload.
    ///
    /// Returns `None` for a missing, malformed, tampered or expired token.
    /// The signature is checked in constant time before the payload is parsed.
    pub fn verify(&self, token: Option<&str>) -> Option<SessionPayload> {
        let token = token.filter(|t| !t.is_empty())?;
        let (payload_b64, signature_b64) = token.split_once('.')?;
        if signature_b64.contains('.') {
            return None;
        }

        let signature = LENIENT_URL_SAFE.decode(signature_b64).ok()?;
        if self.verifier(payload_b64.as_bytes()).verify_slice(&signature).is_err() {
            log::warn!(
                target: "himma::session",
                "msg=\"session signature mismatch\" token_prefix=\"{}...\"",
                token.chars().take(8).collect::<String>()
            );
            return None;
        }

        let body = LENIENT_URL_SAFE.decode(payload_b64).ok()?;
        let raw: RawPayload = serde_json::from_slice(&body).ok()?;
        let expires_at = raw.exp.filter(|exp| *exp != 0)?;

        let payload = SessionPayload {
            subject_id: raw.uid,
            subject_email: raw.email,
            expires_at,
        };

        if payload.is_expired_at(self.clock.now_secs()) {
            log::debug!(target: "himma::session", "msg=\"session expired\" uid={}", payload.subject_id);
            return None;
        }

        Some(payload)
    }

    fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.verifier(message).finalize().into_bytes().to_vec()
    }

    fn verifier(&self, message: &[u8]) -> HmacSha256 {
        // SAFETY: HMAC-SHA256 accepts keys of any length, so this cannot fail.
        #[allow(clippy::expect_used)]
        let mut mac = <HmacSha256 as Mac>::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any size");
        mac.update(message);
        mac
    }
}
