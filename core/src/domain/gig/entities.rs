use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    common::CoreError,
    genre::entities::{Genre, GenreId},
    notification::entities::Notification,
    user::entities::{ApplicationUser, UserId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(value_type = String)]
pub struct GigId(pub Uuid);

impl std::fmt::Display for GigId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for GigId {
    fn from(uuid: Uuid) -> Self {
        GigId(uuid)
    }
}

impl From<GigId> for Uuid {
    fn from(gig_id: GigId) -> Self {
        gig_id.0
    }
}

/// A scheduled performance by an artist at a venue.
///
/// `artist` and `genre` are navigation data filled in by repository reads;
/// a freshly constructed gig carries neither.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Gig {
    pub id: GigId,
    pub artist_id: UserId,
    pub date_time: DateTime<Utc>,
    pub venue: String,
    pub genre_id: GenreId,
    pub is_canceled: bool,

    pub artist: Option<ApplicationUser>,
    pub genre: Option<Genre>,
}

impl Gig {
    pub fn new(artist_id: UserId, input: GigInput) -> Self {
        Self {
            id: GigId(Uuid::new_v4()),
            artist_id,
            date_time: input.date_time,
            venue: input.venue,
            genre_id: input.genre_id,
            is_canceled: false,
            artist: None,
            genre: None,
        }
    }

    /// Strictly after `now`, regardless of cancellation.
    pub fn starts_after(&self, now: DateTime<Utc>) -> bool {
        self.date_time > now
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.starts_after(now) && !self.is_canceled
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.artist_id == user_id
    }

    /// Case-insensitive match on artist name, genre name or venue.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let artist_matches = self
            .artist
            .as_ref()
            .is_some_and(|artist| artist.name.to_lowercase().contains(&query));
        let genre_matches = self
            .genre
            .as_ref()
            .is_some_and(|genre| genre.name.to_lowercase().contains(&query));

        artist_matches || genre_matches || self.venue.to_lowercase().contains(&query)
    }

    /// Marks the gig as canceled. There is no way back.
    pub fn cancel(&mut self) -> Result<Notification, CoreError> {
        if self.is_canceled {
            return Err(CoreError::GigAlreadyCanceled { id: self.id });
        }
        self.is_canceled = true;

        Ok(Notification::gig_canceled(self))
    }

    /// Applies new schedule details; the returned notification keeps the
    /// values the gig had before.
    pub fn modify(&mut self, input: GigInput) -> Notification {
        let notification = Notification::gig_updated(self, self.date_time, self.venue.clone());

        self.date_time = input.date_time;
        self.venue = input.venue;
        if self.genre_id != input.genre_id {
            self.genre = None;
        }
        self.genre_id = input.genre_id;

        notification
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct GigInput {
    #[schema(value_type = String, format = DateTime)]
    pub date_time: DateTime<Utc>,
    pub venue: String,
    pub genre_id: GenreId,
}

impl GigInput {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), CoreError> {
        if self.venue.trim().is_empty() {
            return Err(CoreError::InvalidVenue);
        }
        if self.date_time <= now {
            return Err(CoreError::GigDateNotInFuture);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GigSearchQuery {
    /// Matches artist name, genre or venue
    pub query: Option<String>,
}

/// A gig as seen by one user.
#[derive(Debug, Clone)]
pub struct GigDetails {
    pub gig: Gig,
    pub is_attending: bool,
    pub is_following: bool,
}
