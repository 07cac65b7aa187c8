use crate::domain::{
    common::{
        CoreError,
        services::Service,
        unit_of_work::{UnitOfWork, UnitOfWorkProvider},
    },
    health::port::HealthRepository,
    notification::{
        entities::Notification,
        ports::{NotificationRepository, NotificationService, UserNotificationRepository},
    },
    user::entities::UserId,
};

impl<P, H> NotificationService for Service<P, H>
where
    P: UnitOfWorkProvider,
    H: HealthRepository,
{
    async fn get_new_notifications(&self, user_id: &UserId) -> Result<Vec<Notification>, CoreError> {
        self.provider
            .begin()
            .notifications()
            .get_new_notifications_for(user_id)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn mark_as_read(&self, user_id: &UserId) -> Result<usize, CoreError> {
        let uow = self.provider.begin();

        let mut unread = uow.user_notifications().get_unread_for(user_id).await?;
        for user_notification in unread.iter_mut() {
            user_notification.read();
            uow.user_notifications().mark_read(user_notification).await;
        }
        uow.complete().await?;

        tracing::debug!(count = unread.len(), "notifications marked as read");
        Ok(unread.len())
    }
}
