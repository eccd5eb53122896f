// Main entry point for the records API server

use std::sync::Arc;

use anyhow::{Context, Result};
use expedientes_core::kernel::{bootstrap, HtmlDocumentRenderer, LocalFileStore, ServerDeps};
use expedientes_core::server::build_app;
use expedientes_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,expedientes_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting expedientes API");

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    bootstrap::ensure_superuser(&pool)
        .await
        .context("Failed to seed superuser")?;

    let jwt_service = Arc::new(expedientes_core::domains::auth::JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
    ));
    let deps = Arc::new(ServerDeps::new(
        pool,
        Arc::new(HtmlDocumentRenderer::new(&config.generated_docs_dir)),
        Arc::new(LocalFileStore::new(&config.upload_dir)),
        jwt_service,
    ));

    let app = build_app(deps);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
