//! Health check endpoints
//!
//! - /health, /healthz - Liveness probe with catalog counts
//! - /version          - Build information captured by build.rs

use hyper::{Response, StatusCode};
use serde::Serialize;

use super::helpers::{json_response, BoxBody};
use crate::server::AppState;
use crate::session::Theme;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub healthy: bool,
    pub status: &'static str,
    pub version: &'static str,
    /// Seconds since the service started
    pub uptime: u64,
    pub timestamp: String,
    /// "development" or "production"
    pub mode: &'static str,
    pub catalog: CatalogHealth,
    pub theme: Theme,
    /// Whether logins are checked against a credential store
    pub auth_enabled: bool,
    pub contact_relay: bool,
}

#[derive(Serialize)]
pub struct CatalogHealth {
    pub projects: usize,
    pub blogs: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    pub version: &'static str,
    pub commit: &'static str,
    pub commit_full: &'static str,
    pub build_time: &'static str,
    pub service: &'static str,
}

pub async fn health_check(state: &AppState) -> Response<BoxBody> {
    let theme = state.theme.read().await.theme();

    let response = HealthResponse {
        healthy: true,
        status: "online",
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.started_at.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        mode: if state.args.dev_mode {
            "development"
        } else {
            "production"
        },
        catalog: CatalogHealth {
            projects: state.catalog.projects().len(),
            blogs: state.catalog.blogs().len(),
        },
        theme,
        auth_enabled: state.authority.verifies_credentials(),
        contact_relay: state.relay.is_some(),
    };

    json_response(StatusCode::OK, &response)
}

pub fn version_info() -> Response<BoxBody> {
    let response = VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
        commit_full: option_env!("GIT_COMMIT_FULL").unwrap_or("unknown"),
        build_time: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        service: "folio",
    };

    json_response(StatusCode::OK, &response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{body_json, state};

    #[tokio::test]
    async fn test_health_reports_catalog() {
        let state = state();
        let (status, json) = body_json(health_check(&state).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["healthy"], true);
        assert_eq!(json["catalog"]["projects"], 4);
        assert_eq!(json["catalog"]["blogs"], 2);
        assert_eq!(json["mode"], "development");
        assert_eq!(json["contactRelay"], false);
    }

    #[test]
    fn test_version_info() {
        let (status, json) = tokio_test::block_on(body_json(version_info()));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["service"], "folio");
        assert!(json["commit"].is_string());
    }
}
