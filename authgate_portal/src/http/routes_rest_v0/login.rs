use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use authgate_lib::validation;
use crate::app_state::AppState;
use crate::auth::AuthError;
use crate::http::routes_rest_v0::GeneralError;
use crate::session;

#[derive(Deserialize)]
pub struct RequestData {
    email: String,
    password: String,
}

#[derive(Serialize)]
pub struct ResponseData {
    redirect: String,
    access_token: String,
    token_type: String,
    expires_at: String,
}

pub async fn handler(State(app_state): State<AppState>,
                     headers: HeaderMap,
                     Json(input): Json<RequestData>,
) -> Response {

    // artificial slowdown
    let wait_ms: u64 = 1000u64 + u64::from(rand::thread_rng().next_u32()) / 0x200_000u64; // results in 1000..3048ms
    tokio::time::sleep(std::time::Duration::from_millis(wait_ms)).await;

    // identify the form session
    let session_token = match session::from_headers(&headers) {
        Some(token) => token,
        None => {
            log::warn!("Deny login because no form session cookie was sent");
            return GeneralError::new(StatusCode::BAD_REQUEST, "Missing login session.".to_string()).into_response();
        },
    };

    // consult the attempt guard before anything else
    let guard = app_state.guards.guard_for(&session_token).await;
    if guard.is_locked().await {
        log::warn!("Deny login for session '{}' because attempt guard is locked", session_token);
        return GeneralError::new(StatusCode::TOO_MANY_REQUESTS, "Too many attempts, please wait a minute.".to_string()).into_response();
    }

    // sanitize and validate inputs
    let email = validation::sanitize(&input.email);
    let password = validation::sanitize(&input.password);
    if !validation::validate_email(&email) {
        return GeneralError::new(StatusCode::UNPROCESSABLE_ENTITY, "Invalid email address.".to_string()).into_response();
    }
    if !validation::validate_password(&password) {
        return GeneralError::new(StatusCode::UNPROCESSABLE_ENTITY,
                                 "Password must have at least 8 characters, including upper case, lower case, digit and special character.".to_string()).into_response();
    }

    // relay to the authentication backend
    match app_state.auth.sign_in_with_password(&email, &password).await {
        Ok(auth_session) => {
            // the form session is finished, tear down its guard
            app_state.guards.remove(&session_token).await;
            log::info!("successful login for session '{}'", session_token);
            Json(ResponseData {
                redirect: app_state.config.general.login_redirect.clone(),
                access_token: auth_session.access_token,
                token_type: auth_session.token_type,
                expires_at: auth_session.expires_at.to_rfc3339(),
            }).into_response()
        },
        Err(AuthError::Denied(reason)) => {
            guard.increment_attempt().await;
            log::warn!("Deny login for session '{}': {}", session_token, reason);
            let description = if reason.to_lowercase().contains("too many requests") {
                "Too many login attempts. Please wait a minute."
            } else {
                "Wrong email or password."
            };
            GeneralError::new(StatusCode::UNAUTHORIZED, description.to_string()).into_response()
        },
        Err(AuthError::Unavailable(reason)) => {
            // backend trouble is not a failed credential check, the guard stays untouched
            log::error!("Authentication backend unavailable for session '{}': {}", session_token, reason);
            GeneralError::new(StatusCode::BAD_GATEWAY, "System error, please try again.".to_string()).into_response()
        },
    }
}
