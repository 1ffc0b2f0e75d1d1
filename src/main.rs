use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use track_catalog::{
    config::{Config, DatabaseUrlSource},
    db::SeaOrmConnector,
    handlers,
    state::AppState,
    storage::CdnUrlStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing; LOG_FORMAT=json switches to structured output
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "track_catalog=debug,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting Track Catalog...");

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let database_url_source = DatabaseUrlSource::from_env();
    if config.run_migrations {
        run_migrations(&database_url_source).await?;
    }

    let state = AppState::new(
        config.clone(),
        database_url_source,
        Arc::new(SeaOrmConnector),
        Arc::new(CdnUrlStore::new(config.cdn_base_url.clone())),
    );
    let app = handlers::create_router(state);

    let host: std::net::IpAddr = config
        .server_host
        .parse()
        .context("SERVER_HOST must be an IP address")?;
    let addr = SocketAddr::from((host, config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_migrations(source: &DatabaseUrlSource) -> Result<()> {
    let Some(database_url) = source.resolve() else {
        tracing::warn!("RUN_MIGRATIONS is set but DATABASE_URL is missing, skipping");
        return Ok(());
    };

    let db = Database::connect(&database_url).await?;
    migration::Migrator::up(&db, None).await?;
    db.close().await?;
    tracing::info!("Database migrations completed");

    Ok(())
}
