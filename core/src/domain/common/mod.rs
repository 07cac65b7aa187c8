use thiserror::Error;

use crate::domain::genre::entities::GenreId;
use crate::domain::gig::entities::GigId;
use crate::domain::user::entities::UserId;

pub mod services;
pub mod unit_of_work;

#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("Service is currently unavailable")]
    ServiceUnavailable(String),

    #[error("Gig with id {id} not found")]
    GigNotFound { id: GigId },

    #[error("Gig with id {id} is already canceled")]
    GigAlreadyCanceled { id: GigId },

    #[error("User {user_id} is not the artist of gig {gig_id}")]
    NotGigOwner { gig_id: GigId, user_id: UserId },

    #[error("Venue cannot be empty")]
    InvalidVenue,

    #[error("Gig date must be in the future")]
    GigDateNotInFuture,

    #[error("Genre with id {id} not found")]
    GenreNotFound { id: GenreId },

    #[error("User {attendee_id} already attends gig {gig_id}")]
    AttendanceAlreadyExists { gig_id: GigId, attendee_id: UserId },

    #[error("User {attendee_id} does not attend gig {gig_id}")]
    AttendanceNotFound { gig_id: GigId, attendee_id: UserId },

    #[error("User {follower_id} already follows {followee_id}")]
    FollowingAlreadyExists {
        follower_id: UserId,
        followee_id: UserId,
    },

    #[error("User {follower_id} does not follow {followee_id}")]
    FollowingNotFound {
        follower_id: UserId,
        followee_id: UserId,
    },

    #[error("Constraint violation: {msg}")]
    ConstraintViolation { msg: String },

    #[error("Health check failed")]
    Unhealthy,

    #[error("An unknown error occurred: {message}")]
    UnknownError { message: String },

    #[error("Database error: {msg}")]
    DatabaseError { msg: String },
}

impl From<sqlx::Error> for CoreError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                CoreError::ConstraintViolation {
                    msg: db.message().to_string(),
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                CoreError::ServiceUnavailable(error.to_string())
            }
            _ => CoreError::DatabaseError {
                msg: error.to_string(),
            },
        }
    }
}
