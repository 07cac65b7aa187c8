use sqlx::PgPool;

use crate::domain::health::{entities::IsHealthy, port::HealthRepository};

#[derive(Clone)]
pub struct PostgresHealthRepository {
    pool: PgPool,
}

impl PostgresHealthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl HealthRepository for PostgresHealthRepository {
    async fn ping(&self) -> IsHealthy {
        let result = sqlx::query("SELECT 1").execute(&self.pool).await;
        if let Err(e) = &result {
            tracing::warn!("Database ping failed: {}", e);
        }
        IsHealthy::new(result.is_ok())
    }
}
