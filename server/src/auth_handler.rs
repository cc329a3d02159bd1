use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::log;
use crate::store::{User, UserStore};
use crate::web_server::AppState;

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthResponse {
    fn ok(token: String, user: User) -> Self {
        Self {
            success: true,
            token: Some(token),
            user: Some(user),
            error: None,
        }
    }

    fn err(message: &str) -> Self {
        Self {
            success: false,
            token: None,
            user: None,
            error: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// Resolve the request's bearer token to a user, if any.
pub fn authenticated_user(state: &AppState, headers: &HeaderMap) -> Option<User> {
    let token = bearer_token(headers)?;
    let user_id = state.tokens.resolve(&token)?;
    state.users.get(&user_id)
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    match state.users.find_by_email(&request.email) {
        Some(user) if state.users.verify_password(&request.email, &request.password) => {
            let token = state.tokens.issue(&user.id);
            log!("User {} logged in", user.username);
            (StatusCode::OK, Json(AuthResponse::ok(token, user)))
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(AuthResponse::err("Invalid credentials")),
        ),
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    if request.password.len() < MIN_PASSWORD_LENGTH {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::err("Password must be at least 6 characters")),
        );
    }
    if state.users.find_by_email(&request.email).is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::err("Email already registered")),
        );
    }
    if state.users.find_by_username(&request.username).is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::err("Username already taken")),
        );
    }

    let user = state
        .users
        .register(&request.username, &request.email, &request.password);
    let token = state.tokens.issue(&user.id);
    log!("Registered new user {}", user.username);
    (StatusCode::CREATED, Json(AuthResponse::ok(token, user)))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<LogoutResponse> {
    if let Some(token) = bearer_token(&headers) {
        state.tokens.revoke(&token);
    }
    Json(LogoutResponse { success: true })
}

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, StatusCode> {
    authenticated_user(&state, &headers)
        .map(Json)
        .ok_or(StatusCode::UNAUTHORIZED)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );
        assert_eq!(bearer_token(&headers), Some("abc123".to_string()));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(bearer_token(&headers), None);
    }
}
