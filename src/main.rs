use anyhow::{Context, Result};
use dotenvy::dotenv;
use sea_orm::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tuneful::{config::Config, db, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tuneful=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tuneful...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(profile = config.profile.as_str(), "Configuration loaded");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Connected to database");

    // Create tables
    db::create_schema(&db).await?;
    tracing::info!("Database schema ready");

    // Upload folder
    tokio::fs::create_dir_all(&config.upload_folder)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload folder {}",
                config.upload_folder.display()
            )
        })?;

    let addr = format!("{}:{}", config.server_host, config.server_port);

    // Initialize application state
    let state = AppState::new(db, config);

    // Build application routes
    let app = tuneful::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
