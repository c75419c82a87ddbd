//! Theme routes
//!
//! - GET  /api/theme         - current theme
//! - POST /api/theme/toggle  - flip light/dark
//! - PUT  /api/theme         - set an explicit theme (`{"theme": "dark"}`)

use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::helpers::{error_response, json_response, parse_json_body, BoxBody};
use crate::server::AppState;
use crate::session::Theme;
use crate::types::FolioError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    pub theme: Theme,
    pub is_dark: bool,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        Self {
            theme,
            is_dark: theme.is_dark(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetThemeRequest {
    pub theme: String,
}

pub async fn handle_get_theme(state: &AppState) -> Response<BoxBody> {
    let theme = state.theme.read().await.theme();
    json_response(StatusCode::OK, &ThemeResponse::from(theme))
}

pub async fn handle_toggle_theme(state: &AppState) -> Response<BoxBody> {
    let theme = state.theme.write().await.toggle();
    info!("Theme toggled to {}", theme);
    json_response(StatusCode::OK, &ThemeResponse::from(theme))
}

pub async fn handle_set_theme(state: &AppState, body: &[u8]) -> Response<BoxBody> {
    let request: SetThemeRequest = match parse_json_body(body) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };

    let theme: Theme = match request.theme.parse() {
        Ok(t) => t,
        Err(msg) => return error_response(&FolioError::BadRequest(msg)),
    };

    let theme = state.theme.write().await.set(theme);
    info!("Theme set to {}", theme);
    json_response(StatusCode::OK, &ThemeResponse::from(theme))
}
