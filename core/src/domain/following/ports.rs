use crate::domain::{
    common::{
        CoreError,
        unit_of_work::{Change, ChangeSet, MockDataSource},
    },
    following::entities::Following,
    user::entities::{ApplicationUser, UserId},
};

pub trait FollowingRepository: Send + Sync {
    fn get_following(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> impl Future<Output = Result<Option<Following>, CoreError>> + Send;

    /// Artists followed by `follower_id`, in the order they were followed.
    fn get_followed_artists(
        &self,
        follower_id: &UserId,
    ) -> impl Future<Output = Result<Vec<ApplicationUser>, CoreError>> + Send;

    fn get_followers(
        &self,
        followee_id: &UserId,
    ) -> impl Future<Output = Result<Vec<UserId>, CoreError>> + Send;

    fn add(&self, following: Following) -> impl Future<Output = ()> + Send;

    fn remove(&self, following: Following) -> impl Future<Output = ()> + Send;
}

pub trait FollowingService: Send + Sync {
    /// Subscribes `follower_id` to `followee_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Following)` - The new subscription
    /// - `Err(CoreError::FollowingAlreadyExists)` - Already subscribed
    fn follow(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> impl Future<Output = Result<Following, CoreError>> + Send;

    fn unfollow(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_followed_artists(
        &self,
        follower_id: &UserId,
    ) -> impl Future<Output = Result<Vec<ApplicationUser>, CoreError>> + Send;
}

#[derive(Clone)]
pub struct MockFollowingRepository {
    source: MockDataSource,
    changes: ChangeSet,
}

impl MockFollowingRepository {
    pub fn new(source: MockDataSource, changes: ChangeSet) -> Self {
        Self { source, changes }
    }
}

impl FollowingRepository for MockFollowingRepository {
    async fn get_following(
        &self,
        follower_id: &UserId,
        followee_id: &UserId,
    ) -> Result<Option<Following>, CoreError> {
        let data = self.source.lock().await;

        let following = data
            .followings
            .iter()
            .find(|f| &f.follower_id == follower_id && &f.followee_id == followee_id)
            .cloned();

        Ok(following)
    }

    async fn get_followed_artists(
        &self,
        follower_id: &UserId,
    ) -> Result<Vec<ApplicationUser>, CoreError> {
        let data = self.source.lock().await;

        let mut followings: Vec<&Following> = data
            .followings
            .iter()
            .filter(|f| &f.follower_id == follower_id)
            .collect();
        followings.sort_by_key(|f| f.created_at);

        let artists = followings
            .into_iter()
            .map(|f| {
                data.users
                    .iter()
                    .find(|user| user.id == f.followee_id)
                    .cloned()
                    .unwrap_or_else(|| ApplicationUser {
                        id: f.followee_id,
                        name: String::new(),
                    })
            })
            .collect();

        Ok(artists)
    }

    async fn get_followers(&self, followee_id: &UserId) -> Result<Vec<UserId>, CoreError> {
        let data = self.source.lock().await;

        let followers = data
            .followings
            .iter()
            .filter(|f| &f.followee_id == followee_id)
            .map(|f| f.follower_id)
            .collect();

        Ok(followers)
    }

    async fn add(&self, following: Following) {
        self.changes.stage(Change::AddFollowing(following)).await;
    }

    async fn remove(&self, following: Following) {
        self.changes.stage(Change::RemoveFollowing(following)).await;
    }
}
