use crate::domain::{
    common::{
        CoreError,
        services::Service,
        unit_of_work::{UnitOfWork, UnitOfWorkProvider},
    },
    following::{
        entities::Following,
        ports::{FollowingRepository, FollowingService},
    },
    health::port::HealthRepository,
    user::entities::{ApplicationUser, UserId},
};

impl<P, H> FollowingService for Service<P, H>
where
    P: UnitOfWorkProvider,
    H: HealthRepository,
{
    #[tracing::instrument(skip(self))]
    async fn follow(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> Result<Following, CoreError> {
        let uow = self.provider.begin();

        if uow
            .followings()
            .get_following(follower_id, followee_id)
            .await?
            .is_some()
        {
            return Err(CoreError::FollowingAlreadyExists {
                follower_id: *follower_id,
                followee_id: *followee_id,
            });
        }

        let following = Following::new(*follower_id, *followee_id);
        uow.followings().add(following.clone()).await;
        uow.complete().await?;

        Ok(following)
    }

    #[tracing::instrument(skip(self))]
    async fn unfollow(&self, follower_id: &UserId, followee_id: &UserId) -> Result<(), CoreError> {
        let uow = self.provider.begin();

        let following = uow
            .followings()
            .get_following(follower_id, followee_id)
            .await?
            .ok_or(CoreError::FollowingNotFound {
                follower_id: *follower_id,
                followee_id: *followee_id,
            })?;

        uow.followings().remove(following).await;
        uow.complete().await
    }

    async fn get_followed_artists(
        &self,
        follower_id: &UserId,
    ) -> Result<Vec<ApplicationUser>, CoreError> {
        self.provider
            .begin()
            .followings()
            .get_followed_artists(follower_id)
            .await
    }
}
