//! GET /api/profile, only for authenticated sessions

use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use super::helpers::{error_response, json_response, BoxBody};
use crate::auth::{extract_token_from_header, User};
use crate::server::AppState;
use crate::session::AuthContext;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse<'a> {
    pub user: &'a User,
    pub session_expires_at: Option<u64>,
}

pub fn handle_profile(state: &AppState, auth_header: Option<&str>) -> Response<BoxBody> {
    let token = extract_token_from_header(auth_header);
    let ctx = match AuthContext::restore(Arc::clone(&state.authority), token) {
        Ok(ctx) => ctx,
        Err(e) => return error_response(&e),
    };

    match ctx.require_user() {
        Ok(user) => json_response(
            StatusCode::OK,
            &ProfileResponse {
                user,
                session_expires_at: ctx.view().expires_at,
            },
        ),
        Err(e) => error_response(&e),
    }
}
