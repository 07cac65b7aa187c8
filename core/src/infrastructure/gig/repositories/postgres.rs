use chrono::Utc;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::domain::{
    common::{
        CoreError,
        unit_of_work::{Change, ChangeSet},
    },
    genre::entities::{Genre, GenreId},
    gig::{
        entities::{Gig, GigId},
        ports::GigRepository,
    },
    user::entities::{ApplicationUser, UserId},
};

/// Gig columns plus artist and genre names, aliased so they can sit next to
/// other tables' columns.
pub(crate) const GIG_COLUMNS: &str = r#"
    g.id AS gig_id, g.artist_id AS gig_artist_id, g.date_time AS gig_date_time,
    g.venue AS gig_venue, g.genre_id AS gig_genre_id, g.is_canceled AS gig_is_canceled,
    u.name AS artist_name, ge.name AS genre_name
"#;

pub(crate) const GIG_JOINS: &str = r#"
    LEFT JOIN users u ON u.id = g.artist_id
    LEFT JOIN genres ge ON ge.id = g.genre_id
"#;

pub(crate) fn gig_from_row(row: &PgRow) -> Result<Gig, sqlx::Error> {
    let artist_id = UserId(row.try_get("gig_artist_id")?);
    let genre_id = GenreId(row.try_get("gig_genre_id")?);
    let artist_name: Option<String> = row.try_get("artist_name")?;
    let genre_name: Option<String> = row.try_get("genre_name")?;

    Ok(Gig {
        id: GigId(row.try_get("gig_id")?),
        artist_id,
        date_time: row.try_get("gig_date_time")?,
        venue: row.try_get("gig_venue")?,
        genre_id,
        is_canceled: row.try_get("gig_is_canceled")?,
        artist: artist_name.map(|name| ApplicationUser {
            id: artist_id,
            name,
        }),
        genre: genre_name.map(|name| Genre { id: genre_id, name }),
    })
}

fn gigs_from_rows(rows: Vec<PgRow>) -> Result<Vec<Gig>, CoreError> {
    rows.iter()
        .map(gig_from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(CoreError::from)
}

#[derive(Clone)]
pub struct PostgresGigRepository {
    pool: PgPool,
    changes: ChangeSet,
}

impl PostgresGigRepository {
    pub fn new(pool: PgPool, changes: ChangeSet) -> Self {
        Self { pool, changes }
    }
}

impl GigRepository for PostgresGigRepository {
    async fn get_gig(&self, id: &GigId) -> Result<Option<Gig>, CoreError> {
        let sql = format!("SELECT {GIG_COLUMNS} FROM gigs g {GIG_JOINS} WHERE g.id = $1");

        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(gig_from_row)
            .transpose()
            .map_err(CoreError::from)
    }

    async fn get_upcoming_gigs(&self, query: Option<&str>) -> Result<Vec<Gig>, CoreError> {
        let sql = format!(
            r#"
            SELECT {GIG_COLUMNS}
            FROM gigs g
            {GIG_JOINS}
            WHERE g.date_time > $1 AND g.is_canceled = FALSE
              AND ($2::TEXT IS NULL
                   OR strpos(lower(u.name), lower($2)) > 0
                   OR strpos(lower(ge.name), lower($2)) > 0
                   OR strpos(lower(g.venue), lower($2)) > 0)
            ORDER BY g.date_time ASC
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(Utc::now())
            .bind(query)
            .fetch_all(&self.pool)
            .await?;

        gigs_from_rows(rows)
    }

    async fn get_artist_upcoming_gigs(&self, artist_id: &UserId) -> Result<Vec<Gig>, CoreError> {
        let sql = format!(
            r#"
            SELECT {GIG_COLUMNS}
            FROM gigs g
            {GIG_JOINS}
            WHERE g.artist_id = $1 AND g.date_time > $2 AND g.is_canceled = FALSE
            ORDER BY g.date_time ASC
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(artist_id.0)
            .bind(Utc::now())
            .fetch_all(&self.pool)
            .await?;

        gigs_from_rows(rows)
    }

    async fn get_gigs_user_is_attending(&self, user_id: &UserId) -> Result<Vec<Gig>, CoreError> {
        let sql = format!(
            r#"
            SELECT {GIG_COLUMNS}
            FROM attendances a
            JOIN gigs g ON g.id = a.gig_id
            {GIG_JOINS}
            WHERE a.attendee_id = $1 AND g.date_time > $2
            ORDER BY g.date_time ASC
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(user_id.0)
            .bind(Utc::now())
            .fetch_all(&self.pool)
            .await?;

        gigs_from_rows(rows)
    }

    async fn add(&self, gig: Gig) {
        self.changes.stage(Change::AddGig(gig)).await;
    }

    async fn update(&self, gig: Gig) {
        self.changes.stage(Change::UpdateGig(gig)).await;
    }
}
