//! North Command server binary.
//!
//! Configuration comes from `NORTH_COMMAND__*` environment variables (see
//! `north_command::config`). Without `NORTH_COMMAND__DATABASE__URL` the server
//! runs on in-memory stores seeded with demo accounts.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use north_command::adapters::auth::{JwtConfig, JwtSessionValidator};
use north_command::adapters::memory::InMemoryUserDirectory;
use north_command::app::{demo_users, Application, Stores};
use north_command::config::{AppConfig, DatabaseConfig};
use north_command::ports::SessionValidator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let stores = open_stores(&config.database).await?;
    let validator: Arc<dyn SessionValidator> =
        Arc::new(JwtSessionValidator::new(JwtConfig::from(&config.auth)));

    let app = Application::build(stores, validator, &config.server, &config.realtime);

    let addr = config.server.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %addr,
        environment = ?config.server.environment,
        "North Command listening"
    );

    axum::serve(listener, app.router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_filter));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

async fn open_stores(
    database: &DatabaseConfig,
) -> Result<Stores, Box<dyn std::error::Error + Send + Sync>> {
    let Some(url) = database.connection_url() else {
        tracing::warn!("No database configured; using in-memory stores with demo accounts");
        let users = InMemoryUserDirectory::with_users(demo_users()?);
        return Ok(Stores::in_memory(users));
    };

    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect(url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    tracing::info!(
        max_connections = database.max_connections,
        "Connected to PostgreSQL"
    );
    Ok(Stores::postgres(pool))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
