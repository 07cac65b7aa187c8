use crate::domain::{
    common::{CoreError, services::Service, unit_of_work::UnitOfWorkProvider},
    health::{
        entities::IsHealthy,
        port::{HealthRepository, HealthService},
    },
};

impl<P, H> HealthService for Service<P, H>
where
    P: UnitOfWorkProvider,
    H: HealthRepository,
{
    async fn check_health(&self) -> Result<IsHealthy, CoreError> {
        self.health_repository.ping().await.to_result()
    }
}
