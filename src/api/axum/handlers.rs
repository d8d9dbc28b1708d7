//! HTTP handlers for the site endpoints.

use axum::body::Bytes;
use axum::extract::{FromRequest, Query, Request, State};
use axum::http::header::{CONTENT_TYPE, RETRY_AFTER, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Utc;

use super::error::ApiError;
use super::middleware::{AdminSession, cookie_value, session_from_headers};
use super::routes::AppState;
use crate::actions::{
    ContactForm, FEEDBACK_KEY_PREFIX, FeedbackForm, LOGIN_KEY_PREFIX, LoginAction,
    SaveContentAction, SubmitContactAction, SubmitFeedbackAction,
};
use crate::api::{
    DashboardResponse, FeedbackCreatedResponse, LangRequest, LangResponse,
    ListQuery, LocaleQuery, LoginRequest, LoginResponse, OkResponse, SessionResponse,
};
use crate::events::SiteEvent;
use crate::rate_limit::client_key;
use crate::session::{
    LANG_COOKIE_NAME, SameSite, build_cookie, build_removal_cookie, build_session_cookie,
};
use crate::{Locale, SecretString, SiteContent, SiteError};

/// One year, in seconds.
pub const LANG_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 365;
/// Rows of each inbox shown on the dashboard.
pub const DASHBOARD_LIST_LIMIT: usize = 50;

const LOGIN_FAILED_REDIRECT: &str = "/login?error=Invalid%20email%20or%20password";
const LOGIN_SUCCESS_REDIRECT: &str = "/dashboard";

/// Explicit `locale` query parameter first, then the language cookie.
fn request_locale(query: &LocaleQuery, headers: &HeaderMap) -> Locale {
    Locale::from_param(
        query
            .locale
            .as_deref()
            .or_else(|| cookie_value(headers, LANG_COOKIE_NAME)),
    )
}

fn too_many_requests(retry_after_secs: i64) -> Response {
    let mut response = ApiError(SiteError::TooManyRequests).into_response();
    response
        .headers_mut()
        .insert(RETRY_AFTER, HeaderValue::from(retry_after_secs.max(1)));
    response
}

/// Counts a request against the limiter. `Err` carries the 429 response.
async fn throttle(
    state: &AppState,
    client: &str,
    key_prefix: &str,
    endpoint: &'static str,
) -> Result<(), Response> {
    let decision = state.limiter.check(&format!("{key_prefix}{client}")).await;
    match decision.retry_after_secs() {
        None => Ok(()),
        Some(retry_after_secs) => {
            state
                .events
                .dispatch(SiteEvent::RequestThrottled {
                    client_key: client.to_owned(),
                    endpoint,
                    at: Utc::now(),
                })
                .await;
            Err(too_many_requests(retry_after_secs))
        }
    }
}

fn malformed_body() -> ApiError {
    ApiError(SiteError::Validation("malformed JSON body".to_owned()))
}

/// GET /health
pub async fn health() -> Json<OkResponse> {
    Json(OkResponse::OK)
}

/// GET /api/content
pub async fn get_content(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
) -> Result<Json<SiteContent>, ApiError> {
    let locale = request_locale(&query, &headers);
    let content = state.content.get_content(locale).await?;
    Ok(Json(content))
}

/// PUT /api/content
pub async fn save_content(
    State(state): State<AppState>,
    session: AdminSession,
    Query(query): Query<LocaleQuery>,
    Json(content): Json<SiteContent>,
) -> Result<Json<OkResponse>, ApiError> {
    let locale = Locale::from_param(query.locale.as_deref());
    let action = SaveContentAction::new(state.content, state.events);
    action.execute(locale, content, session.user_id()).await?;
    Ok(Json(OkResponse::OK))
}

/// Throttled before the body is parsed.
///
/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let client = client_key(&headers);
    if let Err(response) = throttle(&state, &client, "", "contact").await {
        return response;
    }

    let Ok(Json(form)) = Json::<ContactForm>::from_bytes(&body) else {
        return malformed_body().into_response();
    };

    let action = SubmitContactAction::new(
        state.messages,
        state.mailer,
        state.contact,
        state.events,
    );

    match action.execute(&form, &client).await {
        Ok(_) => Json(OkResponse::OK).into_response(),
        Err(err) => ApiError(err).into_response(),
    }
}

/// GET /api/contact
pub async fn list_contacts(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let contacts = state.messages.list_contacts(query.limit()).await?;
    Ok(Json(contacts))
}

/// POST /api/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let client = client_key(&headers);
    if let Err(response) = throttle(&state, &client, FEEDBACK_KEY_PREFIX, "feedback").await {
        return response;
    }

    let Ok(Json(form)) = Json::<FeedbackForm>::from_bytes(&body) else {
        return malformed_body().into_response();
    };

    let action = SubmitFeedbackAction::new(state.messages, state.events);
    match action.execute(&form).await {
        Ok(feedback) => (
            StatusCode::CREATED,
            Json(FeedbackCreatedResponse { ok: true, feedback }),
        )
            .into_response(),
        Err(err) => ApiError(err).into_response(),
    }
}

/// GET /api/feedback
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let locale = query.locale.as_deref().map(Locale::parse_lenient);
    let feedback = state.messages.list_feedback(locale, query.limit()).await?;
    Ok(Json(feedback))
}

/// Stores the visitor's language choice. Anything but `ar` means English.
///
/// POST /api/lang
pub async fn set_lang(State(state): State<AppState>, body: Bytes) -> Response {
    let Ok(request) = serde_json::from_slice::<LangRequest>(&body) else {
        return (StatusCode::BAD_REQUEST, Json(OkResponse { ok: false })).into_response();
    };

    let locale = Locale::from_param(request.locale.as_deref());
    let cookie = build_cookie(
        LANG_COOKIE_NAME,
        locale.as_str(),
        "/",
        LANG_COOKIE_MAX_AGE_SECS,
        false,
        SameSite::Lax,
        state.session.cookie_secure,
    );

    (
        [(SET_COOKIE, cookie)],
        Json(LangResponse { ok: true, locale }),
    )
        .into_response()
}

fn is_form_submission(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

/// Accepts an HTML form post (answered with redirects) or a JSON body.
///
/// POST /api/auth/login
pub async fn login(State(state): State<AppState>, request: Request) -> Response {
    let client = client_key(request.headers());
    if let Err(response) = throttle(&state, &client, LOGIN_KEY_PREFIX, "login").await {
        return response;
    }

    let is_form = is_form_submission(request.headers());
    let body = if is_form {
        match Form::<LoginRequest>::from_request(request, &state).await {
            Ok(Form(body)) => body,
            Err(rejection) => return rejection.into_response(),
        }
    } else {
        match Json::<LoginRequest>::from_request(request, &state).await {
            Ok(Json(body)) => body,
            Err(_) => return malformed_body().into_response(),
        }
    };

    let action = LoginAction::new(
        state.users.clone(),
        state.hasher.clone(),
        state.signer.clone(),
        state.events.clone(),
    );
    let password = SecretString::new(body.password);

    match action.execute(&body.email, &password).await {
        Ok((user, token)) => {
            let cookie = build_session_cookie(&token, &state.session);
            if is_form {
                ([(SET_COOKIE, cookie)], Redirect::to(LOGIN_SUCCESS_REDIRECT)).into_response()
            } else {
                (
                    [(SET_COOKIE, cookie)],
                    Json(LoginResponse {
                        ok: true,
                        email: user.email,
                    }),
                )
                    .into_response()
            }
        }
        Err(err) if is_form && err.is_auth_failure() => {
            Redirect::to(LOGIN_FAILED_REDIRECT).into_response()
        }
        Err(err) => ApiError(err).into_response(),
    }
}

/// Always expires the cookie; the event fires only for a live session.
///
/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(session) =
        session_from_headers(&headers, &state.session.cookie_name, &state.signer)
    {
        log::info!(
            target: "himma::auth",
            "msg=\"logged out\" user_id={}",
            session.subject_id
        );
        state
            .events
            .dispatch(SiteEvent::LoggedOut {
                user_id: session.subject_id,
                at: Utc::now(),
            })
            .await;
    }

    (
        [(SET_COOKIE, build_removal_cookie(&state.session))],
        Json(OkResponse::OK),
    )
        .into_response()
}

/// GET /api/auth/me
pub async fn me(session: AdminSession) -> Json<SessionResponse> {
    let AdminSession(payload) = session;
    Json(SessionResponse {
        ok: true,
        user_id: payload.subject_id,
        email: payload.subject_email,
        expires_at: payload.expires_at,
    })
}

/// GET /api/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, ApiError> {
    let locale = request_locale(&query, &headers);
    let content = state.content.get_content(locale).await?;
    let contacts = state.messages.list_contacts(DASHBOARD_LIST_LIMIT).await?;
    let feedback = state
        .messages
        .list_feedback(None, DASHBOARD_LIST_LIMIT)
        .await?;

    Ok(Json(DashboardResponse {
        content,
        contacts,
        feedback,
    }))
}
