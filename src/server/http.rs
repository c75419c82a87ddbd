//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. Every connection gets
//! its own task; requests are routed by `(method, path)`.

use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::auth::{spawn_cleanup_task, Authority};
use crate::catalog::Catalog;
use crate::config::Args;
use crate::contact::{FormRelay, FormSubmitRelay, RelayConfig};
use crate::routes::{self, BoxBody};
use crate::session::{PreferenceStore, ThemeContext};
use crate::types::Result;

/// How often expired revocations are dropped
const REVOCATION_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Shared application state
pub struct AppState {
    pub args: Args,
    /// Project and blog fixtures, immutable after startup
    pub catalog: Catalog,
    /// Credential verification and token issuance
    pub authority: Arc<Authority>,
    /// Process-wide theme preference
    pub theme: RwLock<ThemeContext>,
    /// Contact form delivery (None when no relay is configured)
    pub relay: Option<Arc<dyn FormRelay>>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        args: Args,
        catalog: Catalog,
        authority: Authority,
        theme: ThemeContext,
        relay: Option<Arc<dyn FormRelay>>,
    ) -> Self {
        Self {
            args,
            catalog,
            authority: Arc::new(authority),
            theme: RwLock::new(theme),
            relay,
            started_at: Instant::now(),
        }
    }

    /// Load fixtures, credentials and preferences named by the configuration
    pub fn from_args(args: Args) -> Result<Self> {
        let catalog = Catalog::load(&args.projects_path, &args.blogs_path)?;
        let authority = Authority::from_args(&args)?;
        let theme = ThemeContext::load(PreferenceStore::new(&args.preferences_path));

        let relay: Option<Arc<dyn FormRelay>> = match &args.contact_relay_url {
            Some(endpoint) => Some(Arc::new(FormSubmitRelay::new(RelayConfig {
                endpoint: endpoint.clone(),
                subject: args.contact_subject.clone(),
                timeout: Duration::from_millis(args.request_timeout_ms),
            })?)),
            None => None,
        };

        Ok(Self::new(args, catalog, authority, theme, relay))
    }
}

pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("Folio listening on {}", state.args.listen);

    if state.args.dev_mode {
        warn!("Development mode enabled - insecure token secret allowed");
    }
    if !state.authority.verifies_credentials() {
        warn!("No credential store configured (USERS_PATH)");
    }
    match &state.args.contact_relay_url {
        Some(url) => info!("Contact relay enabled: {}", url),
        None => info!("Contact relay disabled (CONTACT_RELAY_URL not set)"),
    }

    spawn_cleanup_task(state.authority.revocations(), REVOCATION_CLEANUP_INTERVAL);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new()
                        .preserve_header_case(true)
                        .title_case_headers(true)
                        .serve_connection(io, service)
                        .await
                    {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> std::result::Result<Response<BoxBody>, hyper::Error> {
    info!("[{}] {} {}", addr, req.method(), req.uri().path());
    Ok(dispatch(&state, req).await)
}

/// Route a request by `(method, path)`
async fn dispatch<B>(state: &AppState, req: Request<B>) -> Response<BoxBody>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let auth_header = req
        .headers()
        .get(hyper::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if method == Method::OPTIONS {
        return routes::cors_preflight();
    }

    let auth_header = auth_header.as_deref();
    let query = query.as_deref();

    match (&method, path.as_str()) {
        (&Method::GET, "/health") | (&Method::GET, "/healthz") => {
            routes::health_check(state).await
        }
        (&Method::GET, "/version") => routes::version_info(),

        // Catalog
        (&Method::GET, "/api/projects") => routes::handle_list_projects(state, query),
        (&Method::GET, "/api/blogs") => routes::handle_list_blogs(state, query),
        (&Method::GET, p) if p.starts_with("/api/projects/") => {
            routes::handle_get_project(state, &p["/api/projects/".len()..])
        }
        (&Method::GET, p) if p.starts_with("/api/blogs/") => {
            routes::handle_get_blog(state, &p["/api/blogs/".len()..])
        }

        // Theme
        (&Method::GET, "/api/theme") => routes::handle_get_theme(state).await,
        (&Method::POST, "/api/theme/toggle") => routes::handle_toggle_theme(state).await,
        (&Method::PUT, "/api/theme") => match routes::read_body(req.into_body()).await {
            Ok(body) => routes::handle_set_theme(state, &body).await,
            Err(e) => routes::error_response(&e),
        },

        // Contact
        (&Method::POST, "/api/contact") => match routes::read_body(req.into_body()).await {
            Ok(body) => routes::handle_contact(state, &body).await,
            Err(e) => routes::error_response(&e),
        },

        // Session
        (&Method::GET, "/api/profile") => routes::handle_profile(state, auth_header),
        (&Method::POST, "/auth/login") => match routes::read_body(req.into_body()).await {
            Ok(body) => routes::handle_login(state, &body).await,
            Err(e) => routes::error_response(&e),
        },
        (&Method::POST, "/auth/logout") => routes::handle_logout(state, auth_header),
        (&Method::POST, "/auth/refresh") => routes::handle_refresh(state, auth_header),
        (&Method::GET, "/auth/me") => routes::handle_me(state, auth_header),

        (_, p) if is_known_path(p) => routes::method_not_allowed(),
        _ => routes::not_found_response(&path),
    }
}

fn is_known_path(path: &str) -> bool {
    matches!(
        path,
        "/health"
            | "/healthz"
            | "/version"
            | "/api/projects"
            | "/api/blogs"
            | "/api/theme"
            | "/api/theme/toggle"
            | "/api/contact"
            | "/api/profile"
            | "/auth/login"
            | "/auth/logout"
            | "/auth/refresh"
            | "/auth/me"
    ) || path.starts_with("/api/projects/")
        || path.starts_with("/api/blogs/")
}
