use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{path::Path, time::Duration};
use thiserror::Error;

/// Where the cart table migrations live, relative to this crate.
pub const MIGRATIONS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("database.connection_error")]
    ConnectionError(#[source] sqlx::Error),
    #[error("database.migrations_missing")]
    MigrationsMissing,
    #[error("database.migration_error")]
    MigrationError(#[source] sqlx::migrate::MigrateError),
}

/// Connection settings for the remote cart store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }
}

pub async fn create_postgres_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.connection_string)
        .await
        .map_err(DatabaseError::ConnectionError)?;

    tracing::info!(
        max_connections = config.max_connections,
        "Connected to cart database"
    );
    Ok(pool)
}

/// Applies the migrations found in `migrations_path`.
pub async fn run_migrations(pool: &PgPool, migrations_path: &str) -> Result<(), DatabaseError> {
    let path = Path::new(migrations_path);
    if !path.exists() {
        return Err(DatabaseError::MigrationsMissing);
    }

    sqlx::migrate::Migrator::new(path)
        .await
        .map_err(DatabaseError::MigrationError)?
        .run(pool)
        .await
        .map_err(DatabaseError::MigrationError)
}
