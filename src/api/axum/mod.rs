mod cors;
mod error;
mod handlers;
mod middleware;
mod routes;

pub use cors::{allow_list as allow_list_cors, cors_layer, permissive as permissive_cors};
pub use error::ApiError;
pub use handlers::{DASHBOARD_LIST_LIMIT, LANG_COOKIE_MAX_AGE_SECS};
pub use middleware::{AdminSession, cookie_value, session_from_headers};
pub use routes::{AppState, app, site_routes};
