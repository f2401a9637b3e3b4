// Main entry point for the MAGMA API server

use std::sync::Arc;

use anyhow::{Context, Result};
use magma::{HttpFetcher, Magma, PostgresRegistry};
use server_core::{
    server::{build_app, AppState},
    Config,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,magma=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MAGMA volcano activity API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Scraping service
    let fetcher =
        HttpFetcher::new(config.http_timeout()).context("Failed to build HTTP client")?;
    let magma = Magma::new(
        Arc::new(fetcher),
        Arc::new(PostgresRegistry::from_pool(pool.clone())),
        config.source_config()?,
    )
    .with_aggregate_config(config.aggregate_config());
    tracing::info!(
        base_url = %magma.sources().base_url(),
        concurrency = config.scrape_concurrency,
        fetch_timeout_secs = config.scrape_timeout_secs,
        "Document source configured"
    );

    // Build application
    let app = build_app(
        AppState {
            magma,
            db_pool: Some(pool),
        },
        &config.allowed_origins,
        config.request_timeout(),
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
