use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::SiteError;
use crate::api::ErrorResponse;

/// converts `SiteError` into appropriate HTTP responses
#[derive(Debug)]
pub struct ApiError(pub SiteError);

impl From<SiteError> for ApiError {
    fn from(err: SiteError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SiteError::InvalidCredentials | SiteError::Unauthorized => StatusCode::UNAUTHORIZED,
            SiteError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            SiteError::Validation(_) => StatusCode::BAD_REQUEST,
            SiteError::Configuration(_)
            | SiteError::Delivery(_)
            | SiteError::Storage(_)
            | SiteError::PasswordHashError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!(target: "himma::api", "msg=\"request failed\" error=\"{}\"", self.0);
        }
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError(SiteError::Unauthorized).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError(SiteError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError(SiteError::TooManyRequests).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError(SiteError::Validation("x".to_owned())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(SiteError::Storage("x".to_owned())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
