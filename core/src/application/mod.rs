use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::{
    domain::common::{CoreError, services::Service},
    infrastructure::{
        health::repositories::postgres::PostgresHealthRepository,
        unit_of_work::postgres::PostgresUnitOfWorkProvider,
    },
};

/// Concrete service type backed by PostgreSQL.
pub type GigHubService = Service<PostgresUnitOfWorkProvider, PostgresHealthRepository>;

#[derive(Clone)]
pub struct GigHubRepositories {
    pool: PgPool,
    pub unit_of_work_provider: PostgresUnitOfWorkProvider,
    pub health_repository: PostgresHealthRepository,
}

pub async fn create_repositories(
    pg_connection_options: PgConnectOptions,
) -> Result<GigHubRepositories, CoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(pg_connection_options)
        .await
        .map_err(|e| CoreError::ServiceUnavailable(e.to_string()))?;

    Ok(GigHubRepositories::from_pool(pool))
}

impl GigHubRepositories {
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            unit_of_work_provider: PostgresUnitOfWorkProvider::new(pool.clone()),
            health_repository: PostgresHealthRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn run_migrations(&self) -> Result<(), CoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })
    }

    pub async fn shutdown_pool(&self) {
        self.pool.close().await;
    }
}

impl From<GigHubRepositories> for GigHubService {
    fn from(repositories: GigHubRepositories) -> Self {
        Service::new(
            repositories.unit_of_work_provider,
            repositories.health_repository,
        )
    }
}

impl GigHubService {
    pub async fn shutdown_pool(&self) {
        self.provider.pool().close().await;
    }
}
