use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use axum::http::request::Parts;

use super::error::ApiError;
use super::routes::AppState;
use crate::session::read_cookie;
use crate::{SessionPayload, SessionSigner, SiteError};

/// Admin session read from the session cookie.
///
/// Any failure (no cookie, bad MAC, expired) rejects with a generic 401.
#[derive(Debug, Clone)]
pub struct AdminSession(pub SessionPayload);

impl AdminSession {
    pub fn payload(&self) -> &SessionPayload {
        &self.0
    }

    pub fn user_id(&self) -> i64 {
        self.0.subject_id
    }
}

/// Raw value of cookie `name`, if present.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| read_cookie(header, name))
}

pub fn session_from_headers(
    headers: &HeaderMap,
    cookie_name: &str,
    signer: &SessionSigner,
) -> Option<SessionPayload> {
    signer.verify(cookie_value(headers, cookie_name))
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_from_headers(&parts.headers, &state.session.cookie_name, &state.signer)
            .map(AdminSession)
            .ok_or(ApiError(SiteError::Unauthorized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SecretString;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_value_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("lang=ar"));
        headers.append(COOKIE, HeaderValue::from_static("session=abc.def"));

        assert_eq!(cookie_value(&headers, "session"), Some("abc.def"));
        assert_eq!(cookie_value(&headers, "lang"), Some("ar"));
        assert_eq!(cookie_value(&headers, "other"), None);
    }

    #[test]
    fn test_session_from_headers() {
        let signer = SessionSigner::new(SecretString::new("k".repeat(32)));
        let token = signer.issue(3, "admin@example.com");

        let mut headers = HeaderMap::new();
        assert!(session_from_headers(&headers, "session", &signer).is_none());

        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("session={token}")).unwrap(),
        );
        let payload = session_from_headers(&headers, "session", &signer).unwrap();
        assert_eq!(payload.subject_id, 3);

        let other = SessionSigner::new(SecretString::new("x".repeat(32)));
        assert!(session_from_headers(&headers, "session", &other).is_none());
    }
}
