//! Biblio Server - Library Lending System
//!
//! REST API server for a small lending library: accounts, catalog, loans.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblio_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("biblio_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblio Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool. The pool bounds concurrent store
    // access; acquire_timeout bounds waiting for a free connection and
    // busy_timeout bounds statement-level lock waits.
    let connect_options = SqliteConnectOptions::from_str(&config.database.url)
        .expect("Invalid database URL")
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.database.busy_timeout_secs));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect_with(connect_options)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Create schema objects if absent (idempotent)
    let repository = Repository::new(pool);
    repository
        .init_schema()
        .await
        .expect("Failed to initialize database schema");

    tracing::info!("Database schema initialized");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    let services = Services::new(repository, config.auth.clone());

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = api::router(state);

    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
