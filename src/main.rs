//! Folio - portfolio content service

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::{config::Args, server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("folio={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Folio - portfolio content service");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("Mode: {}", if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" });
    info!("Projects: {}", args.projects_path.display());
    info!("Blogs: {}", args.blogs_path.display());
    info!(
        "Users: {}",
        args.users_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );
    info!("Preferences: {}", args.preferences_path.display());
    info!(
        "Page sizes: {} projects, {} blog posts",
        args.projects_page_size, args.blogs_page_size
    );
    info!("======================================");

    let state = match AppState::from_args(args) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    server::run(state).await?;

    Ok(())
}
