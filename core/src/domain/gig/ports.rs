use chrono::Utc;

use crate::domain::{
    common::{
        CoreError,
        unit_of_work::{Change, ChangeSet, MockDataSource},
    },
    gig::entities::{Gig, GigDetails, GigId, GigInput},
    user::entities::UserId,
};

pub trait GigRepository: Send + Sync {
    /// Loads a gig with its artist and genre.
    fn get_gig(&self, id: &GigId) -> impl Future<Output = Result<Option<Gig>, CoreError>> + Send;

    /// Upcoming gigs of every artist, soonest first, optionally narrowed by a
    /// search on artist name, genre name or venue.
    fn get_upcoming_gigs(
        &self,
        query: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Gig>, CoreError>> + Send;

    /// Gigs of `artist_id` that start after now and are not canceled.
    fn get_artist_upcoming_gigs(
        &self,
        artist_id: &UserId,
    ) -> impl Future<Output = Result<Vec<Gig>, CoreError>> + Send;

    /// Gigs attended by `user_id` that start after now. Canceled gigs stay in
    /// the list so the attendee can see the cancellation.
    fn get_gigs_user_is_attending(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<Gig>, CoreError>> + Send;

    fn add(&self, gig: Gig) -> impl Future<Output = ()> + Send;

    fn update(&self, gig: Gig) -> impl Future<Output = ()> + Send;
}

/// Gig operations on behalf of an authenticated user.
///
/// Write operations check ownership: only the artist who posted a gig may
/// change or cancel it. Every write notifies the people who care about the
/// gig: followers of the artist on creation, attendees on update and cancel.
pub trait GigService: Send + Sync {
    /// Posts a new gig for `artist_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Gig)` - The stored gig, reloaded with artist and genre
    /// - `Err(CoreError::InvalidVenue)` / `Err(CoreError::GigDateNotInFuture)` - Invalid input
    /// - `Err(CoreError::GenreNotFound)` - Unknown genre
    fn create_gig(
        &self,
        artist_id: &UserId,
        input: GigInput,
    ) -> impl Future<Output = Result<Gig, CoreError>> + Send;

    /// Changes date, venue and genre of a gig owned by `artist_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Gig)` - The updated gig
    /// - `Err(CoreError::GigNotFound)` - No gig with this id
    /// - `Err(CoreError::NotGigOwner)` - The gig belongs to another artist
    /// - `Err(CoreError::GigAlreadyCanceled)` - Canceled gigs cannot change
    fn update_gig(
        &self,
        artist_id: &UserId,
        gig_id: &GigId,
        input: GigInput,
    ) -> impl Future<Output = Result<Gig, CoreError>> + Send;

    /// Cancels a gig owned by `artist_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The gig is canceled and attendees are notified
    /// - `Err(CoreError::GigNotFound)` - No gig with this id
    /// - `Err(CoreError::NotGigOwner)` - The gig belongs to another artist
    /// - `Err(CoreError::GigAlreadyCanceled)` - The gig was canceled before
    fn cancel_gig(
        &self,
        artist_id: &UserId,
        gig_id: &GigId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_gig_details(
        &self,
        user_id: &UserId,
        gig_id: &GigId,
    ) -> impl Future<Output = Result<GigDetails, CoreError>> + Send;

    fn get_upcoming_gigs(
        &self,
        query: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Gig>, CoreError>> + Send;

    fn get_artist_upcoming_gigs(
        &self,
        artist_id: &UserId,
    ) -> impl Future<Output = Result<Vec<Gig>, CoreError>> + Send;

    fn get_gigs_user_is_attending(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<Gig>, CoreError>> + Send;
}

#[derive(Clone)]
pub struct MockGigRepository {
    source: MockDataSource,
    changes: ChangeSet,
}

impl MockGigRepository {
    pub fn new(source: MockDataSource, changes: ChangeSet) -> Self {
        Self { source, changes }
    }
}

impl GigRepository for MockGigRepository {
    async fn get_gig(&self, id: &GigId) -> Result<Option<Gig>, CoreError> {
        let data = self.source.lock().await;

        Ok(data.find_gig(id))
    }

    async fn get_upcoming_gigs(&self, query: Option<&str>) -> Result<Vec<Gig>, CoreError> {
        let data = self.source.lock().await;
        let now = Utc::now();

        let mut gigs: Vec<Gig> = data
            .gigs
            .iter()
            .filter(|gig| gig.is_upcoming(now))
            .map(|gig| data.load_gig(gig))
            .filter(|gig| query.is_none_or(|query| gig.matches(query)))
            .collect();
        gigs.sort_by_key(|gig| gig.date_time);

        Ok(gigs)
    }

    async fn get_artist_upcoming_gigs(&self, artist_id: &UserId) -> Result<Vec<Gig>, CoreError> {
        let data = self.source.lock().await;
        let now = Utc::now();

        let mut gigs: Vec<Gig> = data
            .gigs
            .iter()
            .filter(|gig| gig.is_owned_by(artist_id) && gig.is_upcoming(now))
            .map(|gig| data.load_gig(gig))
            .collect();
        gigs.sort_by_key(|gig| gig.date_time);

        Ok(gigs)
    }

    async fn get_gigs_user_is_attending(&self, user_id: &UserId) -> Result<Vec<Gig>, CoreError> {
        let data = self.source.lock().await;
        let now = Utc::now();

        let mut gigs: Vec<Gig> = data
            .attendances
            .iter()
            .filter(|attendance| &attendance.attendee_id == user_id)
            .filter_map(|attendance| data.find_gig(&attendance.gig_id))
            .filter(|gig| gig.starts_after(now))
            .collect();
        gigs.sort_by_key(|gig| gig.date_time);

        Ok(gigs)
    }

    async fn add(&self, gig: Gig) {
        self.changes.stage(Change::AddGig(gig)).await;
    }

    async fn update(&self, gig: Gig) {
        self.changes.stage(Change::UpdateGig(gig)).await;
    }
}
