//! Configuration for Folio
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Minimum accepted length for the token signing secret
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Folio - portfolio content service
#[derive(Parser, Debug, Clone)]
#[command(name = "folio")]
#[command(about = "Catalog, theme and session API for a personal portfolio site")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Project fixtures (JSON array)
    #[arg(long, env = "PROJECTS_PATH", default_value = "data/projects.json")]
    pub projects_path: PathBuf,

    /// Blog post fixtures (JSON array)
    #[arg(long, env = "BLOGS_PATH", default_value = "data/blogs.json")]
    pub blogs_path: PathBuf,

    /// Credential store (JSON array of users with Argon2 password hashes)
    /// When unset, only dev mode can log in
    #[arg(long, env = "USERS_PATH")]
    pub users_path: Option<PathBuf>,

    /// Where the theme preference is persisted
    #[arg(long, env = "PREFERENCES_PATH", default_value = "data/preferences.json")]
    pub preferences_path: PathBuf,

    /// Projects per listing page
    #[arg(long, env = "PROJECTS_PAGE_SIZE", default_value = "6")]
    pub projects_page_size: usize,

    /// Blog posts per listing page
    #[arg(long, env = "BLOGS_PAGE_SIZE", default_value = "6")]
    pub blogs_page_size: usize,

    /// Enable development mode (insecure token secret, placeholder logins)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// JWT secret for token signing (required in production)
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: Option<String>,

    /// JWT token expiry in seconds
    #[arg(long, env = "JWT_EXPIRY_SECONDS", default_value = "3600")]
    pub jwt_expiry_seconds: u64,

    /// Form relay endpoint for the contact form (e.g. "https://formsubmit.co/me@example.com")
    #[arg(long, env = "CONTACT_RELAY_URL")]
    pub contact_relay_url: Option<String>,

    /// Subject line attached to relayed contact messages
    #[arg(
        long,
        env = "CONTACT_SUBJECT",
        default_value = "New Contact Form Message from Portfolio"
    )]
    pub contact_subject: String,

    /// Outbound request timeout in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "10000")]
    pub request_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.dev_mode {
            match &self.jwt_secret {
                None => return Err("JWT_SECRET is required in production mode".to_string()),
                Some(secret) if secret.len() < MIN_JWT_SECRET_LEN => {
                    return Err(format!(
                        "JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters"
                    ));
                }
                Some(_) => {}
            }

            if self.users_path.is_none() {
                return Err("USERS_PATH is required in production mode".to_string());
            }
        }

        if self.projects_page_size == 0 || self.blogs_page_size == 0 {
            return Err("Page sizes must be at least 1".to_string());
        }

        if self.jwt_expiry_seconds == 0 {
            return Err("JWT_EXPIRY_SECONDS must be positive".to_string());
        }

        Ok(())
    }
}
