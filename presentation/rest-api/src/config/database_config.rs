use persistence::db::{DatabaseConfig, MIGRATIONS_PATH, create_postgres_pool, run_migrations};
use sqlx::PgPool;
use std::env;

/// Initialize database connection pool from environment variables
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string (required)
/// - DATABASE_MAX_CONNECTIONS: pool size (default: 5)
/// - DATABASE_RUN_MIGRATIONS: apply the cart table migrations on start
///   when "true" (default: "true")
///
/// # Errors
/// Returns error if DATABASE_URL is not set, the connection fails or a
/// migration fails
pub async fn init_database() -> anyhow::Result<PgPool> {
    let db_url = env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let mut config = DatabaseConfig::new(db_url);
    if let Some(max) = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
    {
        config = config.with_max_connections(max);
    }

    let pool = create_postgres_pool(&config).await?;

    let migrate = env::var("DATABASE_RUN_MIGRATIONS")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(true);
    if migrate {
        run_migrations(&pool, MIGRATIONS_PATH).await?;
        tracing::info!("Cart migrations applied");
    }

    Ok(pool)
}
