//! `Set-Cookie` construction and `Cookie` header parsing.

use super::config::{SameSite, SessionConfig};

/// Cookie remembering the visitor's language choice.
pub const LANG_COOKIE_NAME: &str = "lang";

/// Formats a `Set-Cookie` value.
pub fn build_cookie(
    name: &str,
    value: &str,
    path: &str,
    max_age_secs: i64,
    http_only: bool,
    same_site: SameSite,
    secure: bool,
) -> String {
    let mut parts = Vec::with_capacity(6);
    parts.push(format!("{name}={value}"));
    parts.push(format!("Path={path}"));
    parts.push(format!("Max-Age={}", max_age_secs.max(0)));
    if http_only {
        parts.push("HttpOnly".to_owned());
    }
    parts.push(format!("SameSite={}", same_site.as_str()));
    if secure || same_site == SameSite::None {
        parts.push("Secure".to_owned());
    }
    parts.join("; ")
}

/// The cookie that carries a freshly issued session token.
pub fn build_session_cookie(token: &str, config: &SessionConfig) -> String {
    build_cookie(
        &config.cookie_name,
        token,
        &config.cookie_path,
        config.max_age_secs(),
        true,
        config.cookie_same_site,
        config.cookie_secure,
    )
}

/// Expires the session cookie immediately.
pub fn build_removal_cookie(config: &SessionConfig) -> String {
    build_cookie(
        &config.cookie_name,
        "",
        &config.cookie_path,
        0,
        true,
        config.cookie_same_site,
        config.cookie_secure,
    )
}

/// Finds a cookie's value in a raw `Cookie` request header.
pub fn read_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionConfig::default();
        let cookie = build_session_cookie("abc.def", &config);
        assert_eq!(
            cookie,
            "session=abc.def; Path=/; Max-Age=604800; HttpOnly; SameSite=Lax; Secure"
        );
    }

    #[test]
    fn test_insecure_cookie_omits_secure() {
        let config = SessionConfig {
            cookie_secure: false,
            ..Default::default()
        };
        let cookie = build_session_cookie("t", &config);
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_removal_cookie_expires() {
        let cookie = build_removal_cookie(&SessionConfig::default());
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_read_cookie() {
        let header = "lang=ar; session=abc.def; theme=dark";
        assert_eq!(read_cookie(header, "session"), Some("abc.def"));
        assert_eq!(read_cookie(header, "lang"), Some("ar"));
        assert_eq!(read_cookie(header, "missing"), None);
        assert_eq!(read_cookie("session=\"quoted\"", "session"), Some("quoted"));
        assert_eq!(read_cookie("xsession=nope", "session"), None);
    }

    #[test]
    fn test_same_site_none_forces_secure() {
        let cookie = build_cookie("k", "v", "/", 10, false, SameSite::None, false);
        assert_eq!(cookie, "k=v; Path=/; Max-Age=10; SameSite=None; Secure");
    }
}
