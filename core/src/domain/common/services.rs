use crate::domain::{common::unit_of_work::UnitOfWorkProvider, health::port::HealthRepository};

/// Business logic entry point shared by every service trait.
///
/// Each operation opens its own unit of work from `provider`, so no state is
/// carried between calls.
#[derive(Clone)]
pub struct Service<P, H>
where
    P: UnitOfWorkProvider,
    H: HealthRepository,
{
    pub(crate) provider: P,
    pub(crate) health_repository: H,
}

impl<P, H> Service<P, H>
where
    P: UnitOfWorkProvider,
    H: HealthRepository,
{
    pub fn new(provider: P, health_repository: H) -> Self {
        Self {
            provider,
            health_repository,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
