//! Postgres connection pool.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the shared Postgres pool used across the whole application.
pub type DbPool = PgPool;

/// Connection and pool settings.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Pool ceiling.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub connect_timeout: Duration,
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5432,
            user: "postgres".into(),
            password: "postgres".into(),
            name: "employees".into(),
            max_connections: 25,
            min_connections: 5,
            max_lifetime: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl DbSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

/// Create a new connection pool and verify it can reach the server.
pub async fn create_pool(settings: &DbSettings) -> Result<DbPool, DbError> {
    info!(
        host = %settings.host,
        port = settings.port,
        max_connections = settings.max_connections,
        "Connecting to database"
    );
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections.min(settings.max_connections))
        .max_lifetime(settings.max_lifetime)
        .acquire_timeout(settings.connect_timeout)
        .connect_with(settings.connect_options())
        .await?;
    info!("Database connection established");
    Ok(pool)
}

/// Run embedded SQLx migrations located in `./migrations` (relative to the
/// workspace root at build time).
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
