use auth::{AuthError, AuthenticatedSession};
use std::time::Duration as StdDuration;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use domain::{LoginRequest, SignupRequest, User};
use time::Duration as CookieDuration;

use crate::{
    auth_middleware::{CurrentUser, AUTH_TOKEN_COOKIE},
    config::AppConfig,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
}

async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignupRequest>,
) -> Result<(CookieJar, (StatusCode, Json<User>)), StatusCode> {
    let session = state.auth.signup(payload).await.map_err(map_auth_err)?;
    let jar = apply_auth_cookie(jar, &session, &state.config);
    Ok((jar, (StatusCode::CREATED, Json(session.user))))
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<User>), StatusCode> {
    let session = state.auth.login(payload).await.map_err(map_auth_err)?;
    let jar = apply_auth_cookie(jar, &session, &state.config);
    Ok((jar, Json(session.user)))
}

async fn me(user: CurrentUser) -> Json<User> {
    Json(user.0)
}

// Sessions are stateless JWTs; logging out just discards the cookie.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = clear_auth_cookie(jar, &state.config);
    (jar, StatusCode::NO_CONTENT)
}

fn map_auth_err(err: AuthError) -> StatusCode {
    match err {
        AuthError::Validation(_) => StatusCode::BAD_REQUEST,
        AuthError::EmailTaken => StatusCode::CONFLICT,
        AuthError::InvalidCredentials | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
        AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn apply_auth_cookie(
    jar: CookieJar,
    session: &AuthenticatedSession,
    config: &AppConfig,
) -> CookieJar {
    let token_cookie = Cookie::build((AUTH_TOKEN_COOKIE, session.token.clone()))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(config.cookie_same_site)
        .path("/")
        .max_age(duration_to_cookie(config.session_ttl))
        .build();
    jar.add(token_cookie)
}

fn clear_auth_cookie(jar: CookieJar, config: &AppConfig) -> CookieJar {
    let token_cookie = Cookie::build((AUTH_TOKEN_COOKIE, ""))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(config.cookie_same_site)
        .path("/")
        .max_age(CookieDuration::seconds(0))
        .build();
    jar.add(token_cookie)
}

fn duration_to_cookie(duration: StdDuration) -> CookieDuration {
    let seconds = duration.as_secs().min(i64::MAX as u64) as i64;
    CookieDuration::seconds(seconds)
}
