//! safesight - image safe-search analysis backend

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use safesight::api::AdminAuth;
use safesight::config::Config;
use safesight::db::{self, Store};
use safesight::vision::VisionClient;
use safesight::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting safesight v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::parse();
    if config.admin_password == "changeme123" {
        warn!("Admin password is the built-in default; set ADMIN_PASSWORD");
    }

    let pool = db::connect(&config.db_path).await?;
    info!("✓ Connected to database: {}", config.db_path.display());

    let vision = match &config.vision_api_key_file {
        Some(path) => {
            let api_key = std::fs::read_to_string(path)?.trim().to_string();
            let client = VisionClient::new(
                config.vision_api_url.clone(),
                api_key,
                Duration::from_secs(config.vision_timeout_secs),
            )?;
            info!("✓ Vision client configured ({})", config.vision_api_url);
            Some(Arc::new(client))
        }
        None => {
            warn!("VISION_API_KEY_FILE not set; /analyze will answer 502 until configured");
            None
        }
    };

    let state = AppState::new(
        Store::new(pool),
        vision,
        AdminAuth::new(config.admin_username.clone(), config.admin_password.clone()),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("safesight listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
