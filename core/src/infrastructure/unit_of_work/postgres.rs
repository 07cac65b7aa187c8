use sqlx::{PgConnection, PgPool};

use crate::{
    domain::common::{
        CoreError,
        unit_of_work::{Change, ChangeSet, UnitOfWork, UnitOfWorkProvider},
    },
    infrastructure::{
        attendance::repositories::postgres::PostgresAttendanceRepository,
        following::repositories::postgres::PostgresFollowingRepository,
        genre::repositories::postgres::PostgresGenreRepository,
        gig::repositories::postgres::PostgresGigRepository,
        notification::repositories::postgres::{
            PostgresNotificationRepository, PostgresUserNotificationRepository,
        },
    },
};

pub struct PostgresUnitOfWork {
    pool: PgPool,
    changes: ChangeSet,
    gigs: PostgresGigRepository,
    attendances: PostgresAttendanceRepository,
    genres: PostgresGenreRepository,
    followings: PostgresFollowingRepository,
    notifications: PostgresNotificationRepository,
    user_notifications: PostgresUserNotificationRepository,
}

impl PostgresUnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        let changes = ChangeSet::new();
        Self {
            gigs: PostgresGigRepository::new(pool.clone(), changes.clone()),
            attendances: PostgresAttendanceRepository::new(pool.clone(), changes.clone()),
            genres: PostgresGenreRepository::new(pool.clone()),
            followings: PostgresFollowingRepository::new(pool.clone(), changes.clone()),
            notifications: PostgresNotificationRepository::new(pool.clone(), changes.clone()),
            user_notifications: PostgresUserNotificationRepository::new(
                pool.clone(),
                changes.clone(),
            ),
            pool,
            changes,
        }
    }
}

impl UnitOfWork for PostgresUnitOfWork {
    type Gigs = PostgresGigRepository;
    type Attendances = PostgresAttendanceRepository;
    type Genres = PostgresGenreRepository;
    type Followings = PostgresFollowingRepository;
    type Notifications = PostgresNotificationRepository;
    type UserNotifications = PostgresUserNotificationRepository;

    fn gigs(&self) -> &Self::Gigs {
        &self.gigs
    }

    fn attendances(&self) -> &Self::Attendances {
        &self.attendances
    }

    fn genres(&self) -> &Self::Genres {
        &self.genres
    }

    fn followings(&self) -> &Self::Followings {
        &self.followings
    }

    fn notifications(&self) -> &Self::Notifications {
        &self.notifications
    }

    fn user_notifications(&self) -> &Self::UserNotifications {
        &self.user_notifications
    }

    async fn complete(&self) -> Result<(), CoreError> {
        let pending = self.changes.pending().await;
        if pending.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for change in &pending {
            apply_change(&mut *tx, change).await.inspect_err(|e| {
                tracing::warn!("Unit of work rolled back: {}", e);
            })?;
        }
        tx.commit().await?;

        self.changes.acknowledge(pending.len()).await;
        tracing::debug!(changes = pending.len(), "unit of work committed");

        Ok(())
    }

    async fn discard(&self) {
        self.changes.clear().await;
    }
}

async fn apply_change(conn: &mut PgConnection, change: &Change) -> Result<(), CoreError> {
    match change {
        Change::AddGig(gig) => {
            sqlx::query(
                r#"
                INSERT INTO gigs (id, artist_id, date_time, venue, genre_id, is_canceled)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(gig.id.0)
            .bind(gig.artist_id.0)
            .bind(gig.date_time)
            .bind(&gig.venue)
            .bind(gig.genre_id.0)
            .bind(gig.is_canceled)
            .execute(&mut *conn)
            .await?;
        }
        Change::UpdateGig(gig) => {
            // Cancellation is one-way; a canceled gig takes no further writes.
            let result = sqlx::query(
                r#"
                UPDATE gigs
                SET date_time = $2, venue = $3, genre_id = $4, is_canceled = gigs.is_canceled OR $5
                WHERE id = $1 AND is_canceled = FALSE
                "#,
            )
            .bind(gig.id.0)
            .bind(gig.date_time)
            .bind(&gig.venue)
            .bind(gig.genre_id.0)
            .bind(gig.is_canceled)
            .execute(&mut *conn)
            .await?;

            if result.rows_affected() == 0 {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM gigs WHERE id = $1)")
                        .bind(gig.id.0)
                        .fetch_one(&mut *conn)
                        .await?;

                return Err(if exists {
                    CoreError::GigAlreadyCanceled { id: gig.id }
                } else {
                    CoreError::GigNotFound { id: gig.id }
                });
            }
        }
        Change::AddAttendance(attendance) => {
            sqlx::query("INSERT INTO attendances (gig_id, attendee_id) VALUES ($1, $2)")
                .bind(attendance.gig_id.0)
                .bind(attendance.attendee_id.0)
                .execute(&mut *conn)
                .await?;
        }
        Change::RemoveAttendance(attendance) => {
            sqlx::query("DELETE FROM attendances WHERE gig_id = $1 AND attendee_id = $2")
                .bind(attendance.gig_id.0)
                .bind(attendance.attendee_id.0)
                .execute(&mut *conn)
                .await?;
        }
        Change::AddFollowing(following) => {
            sqlx::query(
                "INSERT INTO followings (follower_id, followee_id, created_at) VALUES ($1, $2, $3)",
            )
            .bind(following.follower_id.0)
            .bind(following.followee_id.0)
            .bind(following.created_at)
            .execute(&mut *conn)
            .await?;
        }
        Change::RemoveFollowing(following) => {
            sqlx::query("DELETE FROM followings WHERE follower_id = $1 AND followee_id = $2")
                .bind(following.follower_id.0)
                .bind(following.followee_id.0)
                .execute(&mut *conn)
                .await?;
        }
        Change::AddNotification(notification) => {
            sqlx::query(
                r#"
                INSERT INTO notifications
                    (id, date_time, notification_type, original_date_time, original_venue, gig_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(notification.id.0)
            .bind(notification.date_time)
            .bind(notification.notification_type)
            .bind(notification.original_date_time)
            .bind(&notification.original_venue)
            .bind(notification.gig_id.0)
            .execute(&mut *conn)
            .await?;
        }
        Change::AddUserNotification(user_notification) => {
            sqlx::query(
                "INSERT INTO user_notifications (user_id, notification_id, is_read) VALUES ($1, $2, $3)",
            )
            .bind(user_notification.user_id.0)
            .bind(user_notification.notification_id.0)
            .bind(user_notification.is_read)
            .execute(&mut *conn)
            .await?;
        }
        Change::MarkUserNotificationRead {
            user_id,
            notification_id,
        } => {
            sqlx::query(
                r#"
                UPDATE user_notifications
                SET is_read = TRUE
                WHERE user_id = $1 AND notification_id = $2
                "#,
            )
            .bind(user_id.0)
            .bind(notification_id.0)
            .execute(&mut *conn)
            .await?;
        }
    }

    Ok(())
}

#[derive(Clone)]
pub struct PostgresUnitOfWorkProvider {
    pool: PgPool,
}

impl PostgresUnitOfWorkProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl UnitOfWorkProvider for PostgresUnitOfWorkProvider {
    type UnitOfWork = PostgresUnitOfWork;

    fn begin(&self) -> Self::UnitOfWork {
        PostgresUnitOfWork::new(self.pool.clone())
    }
}
