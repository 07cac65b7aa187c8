use crate::domain::{
    common::{CoreError, unit_of_work::MockDataSource},
    genre::entities::{Genre, GenreId},
};

pub trait GenreRepository: Send + Sync {
    fn get_genres(&self) -> impl Future<Output = Result<Vec<Genre>, CoreError>> + Send;

    fn get_genre(
        &self,
        id: &GenreId,
    ) -> impl Future<Output = Result<Option<Genre>, CoreError>> + Send;
}

pub trait GenreService: Send + Sync {
    fn get_genres(&self) -> impl Future<Output = Result<Vec<Genre>, CoreError>> + Send;
}

#[derive(Clone)]
pub struct MockGenreRepository {
    source: MockDataSource,
}

impl MockGenreRepository {
    pub fn new(source: MockDataSource) -> Self {
        Self { source }
    }
}

impl GenreRepository for MockGenreRepository {
    async fn get_genres(&self) -> Result<Vec<Genre>, CoreError> {
        let data = self.source.lock().await;

        let mut genres = data.genres.clone();
        genres.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(genres)
    }

    async fn get_genre(&self, id: &GenreId) -> Result<Option<Genre>, CoreError> {
        let data = self.source.lock().await;

        Ok(data.genres.iter().find(|genre| &genre.id == id).cloned())
    }
}
