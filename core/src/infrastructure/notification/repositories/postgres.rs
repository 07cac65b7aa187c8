use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    domain::{
        common::{
            CoreError,
            unit_of_work::{Change, ChangeSet},
        },
        notification::{
            entities::{Notification, NotificationId, UserNotification},
            ports::{NotificationRepository, UserNotificationRepository},
        },
        user::entities::UserId,
    },
    infrastructure::gig::repositories::postgres::{GIG_COLUMNS, GIG_JOINS, gig_from_row},
};

fn notification_from_row(row: &PgRow) -> Result<Notification, sqlx::Error> {
    let gig = gig_from_row(row)?;

    Ok(Notification {
        id: NotificationId(row.try_get("id")?),
        date_time: row.try_get("date_time")?,
        notification_type: row.try_get("notification_type")?,
        original_date_time: row.try_get("original_date_time")?,
        original_venue: row.try_get("original_venue")?,
        gig_id: gig.id,
        gig: Some(gig),
    })
}

#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
    changes: ChangeSet,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool, changes: ChangeSet) -> Self {
        Self { pool, changes }
    }
}

impl NotificationRepository for PostgresNotificationRepository {
    async fn get_new_notifications_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Notification>, CoreError> {
        // Same predicate as UserNotification::is_visible_to.
        let sql = format!(
            r#"
            SELECT n.id, n.date_time, n.notification_type, n.original_date_time,
                   n.original_venue, {GIG_COLUMNS}
            FROM user_notifications un
            JOIN notifications n ON n.id = un.notification_id
            JOIN gigs g ON g.id = n.gig_id
            {GIG_JOINS}
            WHERE un.user_id = $1 OR un.is_read = FALSE
            ORDER BY n.date_time DESC
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(user_id.0)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(notification_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(CoreError::from)
    }

    async fn add(&self, notification: Notification) {
        self.changes
            .stage(Change::AddNotification(notification))
            .await;
    }
}

#[derive(Clone)]
pub struct PostgresUserNotificationRepository {
    pool: PgPool,
    changes: ChangeSet,
}

impl PostgresUserNotificationRepository {
    pub fn new(pool: PgPool, changes: ChangeSet) -> Self {
        Self { pool, changes }
    }
}

impl UserNotificationRepository for PostgresUserNotificationRepository {
    async fn get_unread_for(&self, user_id: &UserId) -> Result<Vec<UserNotification>, CoreError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, notification_id, is_read
            FROM user_notifications
            WHERE user_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<UserNotification, sqlx::Error> {
                Ok(UserNotification {
                    user_id: UserId(row.try_get("user_id")?),
                    notification_id: NotificationId(row.try_get("notification_id")?),
                    is_read: row.try_get("is_read")?,
                    notification: None,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(CoreError::from)
    }

    async fn add(&self, user_notification: UserNotification) {
        self.changes
            .stage(Change::AddUserNotification(user_notification))
            .await;
    }

    async fn mark_read(&self, user_notification: &UserNotification) {
        self.changes
            .stage(Change::MarkUserNotificationRead {
                user_id: user_notification.user_id,
                notification_id: user_notification.notification_id,
            })
            .await;
    }
}
