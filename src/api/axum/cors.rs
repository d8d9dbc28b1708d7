//! CORS configuration using tower-http.

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

use crate::Environment;

/// Allows any origin. Development only.
pub fn permissive() -> CorsLayer {
    CorsLayer::permissive()
}

/// Allow-list of origins with credentials, for the admin dashboard.
///
/// Unparseable origins are skipped.
pub fn allow_list<S: AsRef<str>>(allowed_origins: &[S]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|s| s.as_ref().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::COOKIE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Layer for the configured origins.
///
/// With no origins, development is permissive and production allows
/// same-origin requests only.
pub fn cors_layer(allowed_origins: &[String], environment: Environment) -> CorsLayer {
    match (allowed_origins.is_empty(), environment) {
        (false, _) => allow_list(allowed_origins),
        (true, Environment::Development) => permissive(),
        (true, Environment::Production) => CorsLayer::new(),
    }
}
