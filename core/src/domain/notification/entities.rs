use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    gig::entities::{Gig, GigId},
    user::entities::UserId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(value_type = String)]
pub struct NotificationId(pub Uuid);

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for NotificationId {
    fn from(uuid: Uuid) -> Self {
        NotificationId(uuid)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    GigCanceled,
    GigUpdated,
    GigCreated,
}

/// Something that happened to a gig, fanned out to users through
/// [`UserNotification`] rows.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub date_time: DateTime<Utc>,
    pub notification_type: NotificationType,
    pub original_date_time: Option<DateTime<Utc>>,
    pub original_venue: Option<String>,
    pub gig_id: GigId,

    pub gig: Option<Gig>,
}

impl Notification {
    fn new(notification_type: NotificationType, gig: &Gig) -> Self {
        Self {
            id: NotificationId(Uuid::new_v4()),
            date_time: Utc::now(),
            notification_type,
            original_date_time: None,
            original_venue: None,
            gig_id: gig.id,
            gig: None,
        }
    }

    pub fn gig_created(gig: &Gig) -> Self {
        Self::new(NotificationType::GigCreated, gig)
    }

    pub fn gig_updated(
        gig: &Gig,
        original_date_time: DateTime<Utc>,
        original_venue: String,
    ) -> Self {
        Self {
            original_date_time: Some(original_date_time),
            original_venue: Some(original_venue),
            ..Self::new(NotificationType::GigUpdated, gig)
        }
    }

    pub fn gig_canceled(gig: &Gig) -> Self {
        Self::new(NotificationType::GigCanceled, gig)
    }

    pub fn notify(&self, user_id: UserId) -> UserNotification {
        UserNotification {
            user_id,
            notification_id: self.id,
            is_read: false,
            notification: None,
        }
    }
}

/// Per-user read state of a notification, keyed by `(user_id, notification_id)`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserNotification {
    pub user_id: UserId,
    pub notification_id: NotificationId,
    pub is_read: bool,

    pub notification: Option<Notification>,
}

impl UserNotification {
    pub fn read(&mut self) {
        self.is_read = true;
    }

    pub fn same_key(&self, other: &UserNotification) -> bool {
        self.user_id == other.user_id && self.notification_id == other.notification_id
    }

    // FIXME: matches every unread row of every user, not only the caller's
    // own unread ones. Kept as is until the notification feed is reworked.
    pub fn is_visible_to(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id || !self.is_read
    }
}
