use sqlx::{PgPool, Row};

use crate::domain::{
    common::{
        CoreError,
        unit_of_work::{Change, ChangeSet},
    },
    following::{entities::Following, ports::FollowingRepository},
    user::entities::{ApplicationUser, UserId},
};

#[derive(Clone)]
pub struct PostgresFollowingRepository {
    pool: PgPool,
    changes: ChangeSet,
}

impl PostgresFollowingRepository {
    pub fn new(pool: PgPool, changes: ChangeSet) -> Self {
        Self { pool, changes }
    }
}

impl FollowingRepository for PostgresFollowingRepository {
    async fn get_following(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> Result<Option<Following>, CoreError> {
        let row = sqlx::query(
            r#"
            SELECT follower_id, followee_id, created_at
            FROM followings
            WHERE follower_id = $1 AND followee_id = $2
            "#,
        )
        .bind(follower_id.0)
        .bind(followee_id.0)
        .fetch_optional(&self.pool)
        .await?;

        let following = match row {
            Some(row) => Some(Following {
                follower_id: UserId(row.try_get("follower_id")?),
                followee_id: UserId(row.try_get("followee_id")?),
                created_at: row.try_get("created_at")?,
            }),
            None => None,
        };

        Ok(following)
    }

    async fn get_followed_artists(
        &self,
        follower_id: &UserId,
    ) -> Result<Vec<ApplicationUser>, CoreError> {
        // Artists not yet provisioned by the identity provider come back nameless.
        let rows = sqlx::query(
            r#"
            SELECT f.followee_id AS id, COALESCE(u.name, '') AS name
            FROM followings f
            LEFT JOIN users u ON u.id = f.followee_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at ASC
            "#,
        )
        .bind(follower_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<ApplicationUser, sqlx::Error> {
                Ok(ApplicationUser {
                    id: UserId(row.try_get("id")?),
                    name: row.try_get("name")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(CoreError::from)
    }

    async fn get_followers(&self, followee_id: &UserId) -> Result<Vec<UserId>, CoreError> {
        let followers: Vec<uuid::Uuid> =
            sqlx::query_scalar("SELECT follower_id FROM followings WHERE followee_id = $1")
                .bind(followee_id.0)
                .fetch_all(&self.pool)
                .await?;

        Ok(followers.into_iter().map(UserId).collect())
    }

    async fn add(&self, following: Following) {
        self.changes.stage(Change::AddFollowing(following)).await;
    }

    async fn remove(&self, following: Following) {
        self.changes.stage(Change::RemoveFollowing(following)).await;
    }
}
