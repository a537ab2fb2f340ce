//! Wedding invitation backend server.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use invitation_backend::config::Config;
use invitation_backend::db::{self, Repository};
use invitation_backend::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting invitation backend");
    tracing::info!("Data directory: {:?}", config.data_dir);
    tracing::info!("Public directory: {:?}", config.public_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.database_url, config.max_connections).await?;
    let repo = Arc::new(Repository::new(pool));

    let bind_addr = config.bind_addr;
    let app = create_router(AppState::new(repo, config));

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
