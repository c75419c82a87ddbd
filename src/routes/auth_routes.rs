//! HTTP Routes for Authentication
//!
//! - POST /auth/login    - Verify credentials and get a JWT token
//! - POST /auth/logout   - Revoke the presented token
//! - POST /auth/refresh  - Exchange a valid token for a fresh one
//! - GET  /auth/me       - Session state for the presented token

use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use super::helpers::{error_response, json_response, parse_json_body, success_response, BoxBody};
use crate::auth::{extract_token_from_header, Credentials, IssuedToken, User};
use crate::server::AppState;
use crate::session::AuthContext;
use crate::types::{FolioError, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: u64,
    pub user: User,
}

impl From<IssuedToken> for AuthResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            user: issued.claims.user(),
            expires_at: issued.claims.exp,
            token: issued.token,
        }
    }
}

fn require_token(auth_header: Option<&str>) -> Result<&str> {
    extract_token_from_header(auth_header)
        .ok_or_else(|| FolioError::Unauthorized("No token provided".into()))
}

/// Session context for a request carrying a bearer token
fn session(state: &AppState, auth_header: Option<&str>) -> Result<AuthContext> {
    let token = require_token(auth_header)?;
    AuthContext::restore(Arc::clone(&state.authority), Some(token))
}

/// POST /auth/login
///
/// Argon2 verification runs on the blocking pool.
pub async fn handle_login(state: &AppState, body: &[u8]) -> Response<BoxBody> {
    let credentials: Credentials = match parse_json_body(body) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };

    let authority = Arc::clone(&state.authority);
    let result = tokio::task::spawn_blocking(move || {
        let mut ctx = AuthContext::new(authority);
        ctx.login(&credentials)
    })
    .await
    .unwrap_or_else(|e| Err(FolioError::Internal(format!("Login task failed: {}", e))));

    match result {
        Ok(issued) => json_response(StatusCode::OK, &AuthResponse::from(issued)),
        Err(e) => error_response(&e),
    }
}

/// POST /auth/logout
pub fn handle_logout(state: &AppState, auth_header: Option<&str>) -> Response<BoxBody> {
    let result = session(state, auth_header).and_then(|mut ctx| ctx.logout());
    match result {
        Ok(()) => success_response("Logged out successfully"),
        Err(e) => error_response(&e),
    }
}

/// POST /auth/refresh
pub fn handle_refresh(state: &AppState, auth_header: Option<&str>) -> Response<BoxBody> {
    let result = session(state, auth_header).and_then(|mut ctx| ctx.refresh());
    match result {
        Ok(issued) => json_response(StatusCode::OK, &AuthResponse::from(issued)),
        Err(e) => error_response(&e),
    }
}

/// GET /auth/me
pub fn handle_me(state: &AppState, auth_header: Option<&str>) -> Response<BoxBody> {
    match session(state, auth_header) {
        Ok(ctx) => json_response(StatusCode::OK, &ctx.view()),
        Err(e) => error_response(&e),
    }
}
