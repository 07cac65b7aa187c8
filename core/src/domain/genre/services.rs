use crate::domain::{
    common::{
        CoreError,
        services::Service,
        unit_of_work::{UnitOfWork, UnitOfWorkProvider},
    },
    genre::{
        entities::Genre,
        ports::{GenreRepository, GenreService},
    },
    health::port::HealthRepository,
};

impl<P, H> GenreService for Service<P, H>
where
    P: UnitOfWorkProvider,
    H: HealthRepository,
{
    async fn get_genres(&self) -> Result<Vec<Genre>, CoreError> {
        self.provider.begin().genres().get_genres().await
    }
}
