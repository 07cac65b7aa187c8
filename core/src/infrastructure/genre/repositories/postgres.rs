use sqlx::{PgPool, Row, postgres::PgRow};

use crate::domain::{
    common::CoreError,
    genre::{
        entities::{Genre, GenreId},
        ports::GenreRepository,
    },
};

fn genre_from_row(row: &PgRow) -> Result<Genre, sqlx::Error> {
    Ok(Genre {
        id: GenreId(row.try_get("id")?),
        name: row.try_get("name")?,
    })
}

#[derive(Clone)]
pub struct PostgresGenreRepository {
    pool: PgPool,
}

impl PostgresGenreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl GenreRepository for PostgresGenreRepository {
    async fn get_genres(&self) -> Result<Vec<Genre>, CoreError> {
        let rows = sqlx::query("SELECT id, name FROM genres ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(genre_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(CoreError::from)
    }

    async fn get_genre(&self, id: &GenreId) -> Result<Option<Genre>, CoreError> {
        let row = sqlx::query("SELECT id, name FROM genres WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(genre_from_row)
            .transpose()
            .map_err(CoreError::from)
    }
}
