use chrono::Utc;
use poem_openapi::{Object, OpenApi, payload::Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::tags::ApiTags;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct HealthCheckResponse {
    /// "healthy" when the cart store answers, "degraded" otherwise
    pub status: String,
    /// "up" or "down"
    pub database: String,
    /// Current server timestamp
    pub timestamp: String,
    /// Service version
    pub version: String,
}

/// Health API for probes and monitoring
pub struct Api {
    pool: PgPool,
}

impl Api {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn database_up(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Health check could not reach the cart database: {e}");
                false
            }
        }
    }
}

#[OpenApi]
impl Api {
    /// Health check endpoint
    ///
    /// Public. Reports whether the service can reach the cart database.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health_check(&self) -> Json<HealthCheckResponse> {
        let up = self.database_up().await;
        Json(HealthCheckResponse {
            status: if up { "healthy" } else { "degraded" }.to_string(),
            database: if up { "up" } else { "down" }.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}
