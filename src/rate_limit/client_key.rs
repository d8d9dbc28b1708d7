/// Key used when a request carries no usable forwarded address.
pub const UNKNOWN_CLIENT_KEY: &str = "unknown-ip";

/// Derives the limiter key from a raw `X-Forwarded-For` value.
///
/// The first hop is the client as seen by the outermost proxy. The header is
/// client-controlled unless a trusted proxy rewrites it.
pub fn client_key_from_forwarded(forwarded_for: Option<&str>) -> String {
    forwarded_for
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .map_or_else(|| UNKNOWN_CLIENT_KEY.to_owned(), ToOwned::to_owned)
}

/// Derives the limiter key from request headers.
#[cfg(feature = "axum_api")]
pub fn client_key(headers: &axum::http::HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok());
    client_key_from_forwarded(forwarded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_hop_trimmed() {
        assert_eq!(
            client_key_from_forwarded(Some("  203.0.113.7 , 10.0.0.1, 10.0.0.2")),
            "203.0.113.7"
        );
        assert_eq!(client_key_from_forwarded(Some("198.51.100.1")), "198.51.100.1");
    }

    #[test]
    fn test_missing_or_empty_is_sentinel() {
        assert_eq!(client_key_from_forwarded(None), UNKNOWN_CLIENT_KEY);
        assert_eq!(client_key_from_forwarded(Some("")), UNKNOWN_CLIENT_KEY);
        assert_eq!(client_key_from_forwarded(Some(" , 10.0.0.1")), UNKNOWN_CLIENT_KEY);
    }

    #[cfg(feature = "axum_api")]
    #[test]
    fn test_from_header_map() {
        use axum::http::{HeaderMap, HeaderValue};

        let mut headers = HeaderMap::new();
        assert_eq!(client_key(&headers), "unknown-ip");

        headers.insert("x-forwarded-for", HeaderValue::from_static("1.2.3.4, 5.6.7.8"));
        assert_eq!(client_key(&headers), "1.2.3.4");

        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_bytes(b"\xff\xfe").unwrap(),
        );
        assert_eq!(client_key(&headers), "unknown-ip");
    }
}
