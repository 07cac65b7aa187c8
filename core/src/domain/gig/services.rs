use chrono::Utc;

use crate::domain::{
    attendance::ports::AttendanceRepository,
    common::{
        CoreError,
        services::Service,
        unit_of_work::{UnitOfWork, UnitOfWorkProvider},
    },
    following::ports::FollowingRepository,
    genre::ports::GenreRepository,
    gig::{
        entities::{Gig, GigDetails, GigId, GigInput},
        ports::{GigRepository, GigService},
    },
    health::port::HealthRepository,
    notification::{
        entities::Notification,
        ports::{NotificationRepository, UserNotificationRepository},
    },
    user::entities::UserId,
};

impl<P, H> GigService for Service<P, H>
where
    P: UnitOfWorkProvider,
    H: HealthRepository,
{
    #[tracing::instrument(skip(self, input))]
    async fn create_gig(&self, artist_id: &UserId, input: GigInput) -> Result<Gig, CoreError> {
        input.validate(Utc::now())?;

        let uow = self.provider.begin();
        ensure_genre_exists(&uow, &input).await?;

        let gig = Gig::new(*artist_id, input);
        let notification = Notification::gig_created(&gig);
        let followers = uow.followings().get_followers(artist_id).await?;

        uow.gigs().add(gig.clone()).await;
        notify(&uow, notification, followers).await;
        uow.complete().await?;

        tracing::info!(gig_id = %gig.id, "gig created");

        uow.gigs()
            .get_gig(&gig.id)
            .await?
            .ok_or(CoreError::GigNotFound { id: gig.id })
    }

    #[tracing::instrument(skip(self, input))]
    async fn update_gig(
        &self,
        artist_id: &UserId,
        gig_id: &GigId,
        input: GigInput,
    ) -> Result<Gig, CoreError> {
        input.validate(Utc::now())?;

        let uow = self.provider.begin();
        let mut gig = owned_gig(&uow, artist_id, gig_id).await?;
        if gig.is_canceled {
            return Err(CoreError::GigAlreadyCanceled { id: gig.id });
        }
        ensure_genre_exists(&uow, &input).await?;

        let notification = gig.modify(input);
        let attendees = uow.attendances().get_gig_attendees(gig_id).await?;

        uow.gigs().update(gig.clone()).await;
        notify(&uow, notification, attendees).await;
        uow.complete().await?;

        tracing::info!(gig_id = %gig.id, "gig updated");

        uow.gigs()
            .get_gig(gig_id)
            .await?
            .ok_or(CoreError::GigNotFound { id: *gig_id })
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_gig(&self, artist_id: &UserId, gig_id: &GigId) -> Result<(), CoreError> {
        let uow = self.provider.begin();
        let mut gig = owned_gig(&uow, artist_id, gig_id).await?;

        let notification = gig.cancel()?;
        let attendees = uow.attendances().get_gig_attendees(gig_id).await?;

        uow.gigs().update(gig).await;
        notify(&uow, notification, attendees).await;
        uow.complete().await?;

        tracing::info!(gig_id = %gig_id, "gig canceled");
        Ok(())
    }

    async fn get_gig_details(
        &self,
        user_id: &UserId,
        gig_id: &GigId,
    ) -> Result<GigDetails, CoreError> {
        let uow = self.provider.begin();

        let gig = uow
            .gigs()
            .get_gig(gig_id)
            .await?
            .ok_or(CoreError::GigNotFound { id: *gig_id })?;
        let is_attending = uow
            .attendances()
            .get_attendance(gig_id, user_id)
            .await?
            .is_some();
        let is_following = uow
            .followings()
            .get_following(user_id, &gig.artist_id)
            .await?
            .is_some();

        Ok(GigDetails {
            gig,
            is_attending,
            is_following,
        })
    }

    async fn get_upcoming_gigs(&self, query: Option<&str>) -> Result<Vec<Gig>, CoreError> {
        let query = query.map(str::trim).filter(|query| !query.is_empty());

        self.provider.begin().gigs().get_upcoming_gigs(query).await
    }

    async fn get_artist_upcoming_gigs(&self, artist_id: &UserId) -> Result<Vec<Gig>, CoreError> {
        self.provider
            .begin()
            .gigs()
            .get_artist_upcoming_gigs(artist_id)
            .await
    }

    async fn get_gigs_user_is_attending(&self, user_id: &UserId) -> Result<Vec<Gig>, CoreError> {
        self.provider
            .begin()
            .gigs()
            .get_gigs_user_is_attending(user_id)
            .await
    }
}

async fn owned_gig<U: UnitOfWork>(
    uow: &U,
    artist_id: &UserId,
    gig_id: &GigId,
) -> Result<Gig, CoreError> {
    let gig = uow
        .gigs()
        .get_gig(gig_id)
        .await?
        .ok_or(CoreError::GigNotFound { id: *gig_id })?;

    if !gig.is_owned_by(artist_id) {
        return Err(CoreError::NotGigOwner {
            gig_id: *gig_id,
            user_id: *artist_id,
        });
    }

    Ok(gig)
}

async fn ensure_genre_exists<U: UnitOfWork>(uow: &U, input: &GigInput) -> Result<(), CoreError> {
    uow.genres()
        .get_genre(&input.genre_id)
        .await?
        .map(|_| ())
        .ok_or(CoreError::GenreNotFound { id: input.genre_id })
}

/// Stages the notification followed by one unread row per recipient.
async fn notify<U: UnitOfWork>(uow: &U, notification: Notification, recipients: Vec<UserId>) {
    let rows: Vec<_> = recipients
        .into_iter()
        .map(|user_id| notification.notify(user_id))
        .collect();

    uow.notifications().add(notification).await;
    for row in rows {
        uow.user_notifications().add(row).await;
    }
}
