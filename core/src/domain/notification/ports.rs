use std::cmp::Reverse;

use crate::domain::{
    common::{
        CoreError,
        unit_of_work::{Change, ChangeSet, MockDataSource},
    },
    notification::entities::{Notification, UserNotification},
    user::entities::UserId,
};

pub trait NotificationRepository: Send + Sync {
    /// Notifications of every user-notification row visible to `user_id`
    /// (see [`UserNotification::is_visible_to`]), newest first, each with its
    /// gig and the gig's artist loaded.
    fn get_new_notifications_for(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<Notification>, CoreError>> + Send;

    fn add(&self, notification: Notification) -> impl Future<Output = ()> + Send;
}

pub trait UserNotificationRepository: Send + Sync {
    /// Rows owned by `user_id` that are still unread.
    fn get_unread_for(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<UserNotification>, CoreError>> + Send;

    fn add(&self, user_notification: UserNotification) -> impl Future<Output = ()> + Send;

    fn mark_read(&self, user_notification: &UserNotification) -> impl Future<Output = ()> + Send;
}

pub trait NotificationService: Send + Sync {
    fn get_new_notifications(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<Notification>, CoreError>> + Send;

    /// Marks every unread notification of `user_id` as read and returns how
    /// many were marked.
    fn mark_as_read(&self, user_id: &UserId)
    -> impl Future<Output = Result<usize, CoreError>> + Send;
}

#[derive(Clone)]
pub struct MockNotificationRepository {
    source: MockDataSource,
    changes: ChangeSet,
}

impl MockNotificationRepository {
    pub fn new(source: MockDataSource, changes: ChangeSet) -> Self {
        Self { source, changes }
    }
}

impl NotificationRepository for MockNotificationRepository {
    async fn get_new_notifications_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Notification>, CoreError> {
        let data = self.source.lock().await;

        let mut notifications: Vec<Notification> = data
            .user_notifications
            .iter()
            .filter(|un| un.is_visible_to(user_id))
            .filter_map(|un| {
                data.notifications
                    .iter()
                    .find(|n| n.id == un.notification_id)
            })
            .map(|n| Notification {
                gig: data.find_gig(&n.gig_id),
                ..n.clone()
            })
            .collect();
        notifications.sort_by_key(|n| Reverse(n.date_time));

        Ok(notifications)
    }

    async fn add(&self, notification: Notification) {
        self.changes
            .stage(Change::AddNotification(notification))
            .await;
    }
}

#[derive(Clone)]
pub struct MockUserNotificationRepository {
    source: MockDataSource,
    changes: ChangeSet,
}

impl MockUserNotificationRepository {
    pub fn new(source: MockDataSource, changes: ChangeSet) -> Self {
        Self { source, changes }
    }
}

impl UserNotificationRepository for MockUserNotificationRepository {
    async fn get_unread_for(&self, user_id: &UserId) -> Result<Vec<UserNotification>, CoreError> {
        let data = self.source.lock().await;

        let unread = data
            .user_notifications
            .iter()
            .filter(|un| &un.user_id == user_id && !un.is_read)
            .cloned()
            .collect();

        Ok(unread)
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
