//! JSON shapes returned by the API, mapped from domain entities.

use chrono::{DateTime, Utc};
use gighub_core::domain::{
    attendance::entities::Attendance,
    following::entities::Following,
    genre::entities::Genre,
    gig::entities::{Gig, GigDetails},
    notification::entities::{Notification, NotificationType},
    user::entities::ApplicationUser,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
}

impl From<&ApplicationUser> for UserDto {
    fn from(user: &ApplicationUser) -> Self {
        Self {
            id: user.id.0,
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct GenreDto {
    pub id: i16,
    pub name: String,
}

impl From<&Genre> for GenreDto {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id.0,
            name: genre.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct GigDto {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub artist: Option<UserDto>,
    pub date_time: DateTime<Utc>,
    pub venue: String,
    pub genre_id: i16,
    pub genre: Option<GenreDto>,
    pub is_canceled: bool,
}

impl From<&Gig> for GigDto {
    fn from(gig: &Gig) -> Self {
        Self {
            id: gig.id.0,
            artist_id: gig.artist_id.0,
            artist: gig.artist.as_ref().map(UserDto::from),
            date_time: gig.date_time,
            venue: gig.venue.clone(),
            genre_id: gig.genre_id.0,
            genre: gig.genre.as_ref().map(GenreDto::from),
            is_canceled: gig.is_canceled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct GigDetailsDto {
    pub gig: GigDto,
    pub is_attending: bool,
    pub is_following: bool,
}

impl From<&GigDetails> for GigDetailsDto {
    fn from(details: &GigDetails) -> Self {
        Self {
            gig: GigDto::from(&details.gig),
            is_attending: details.is_attending,
            is_following: details.is_following,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct NotificationDto {
    pub date_time: DateTime<Utc>,
    pub notification_type: NotificationType,
    pub original_date_time: Option<DateTime<Utc>>,
    pub original_venue: Option<String>,
    pub gig_id: Uuid,
    pub gig: Option<GigDto>,
}

impl From<&Notification> for NotificationDto {
    fn from(notification: &Notification) -> Self {
        Self {
            date_time: notification.date_time,
            notification_type: notification.notification_type,
            original_date_time: notification.original_date_time,
            original_venue: notification.original_venue.clone(),
            gig_id: notification.gig_id.0,
            gig: notification.gig.as_ref().map(GigDto::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct AttendanceDto {
    pub gig_id: Uuid,
    pub attendee_id: Uuid,
    pub gig: Option<GigDto>,
}

impl From<&Attendance> for AttendanceDto {
    fn from(attendance: &Attendance) -> Self {
        Self {
            gig_id: attendance.gig_id.0,
            attendee_id: attendance.attendee_id.0,
            gig: attendance.gig.as_ref().map(GigDto::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct FollowingDto {
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&Following> for FollowingDto {
    fn from(following: &Following) -> Self {
        Self {
            follower_id: following.follower_id.0,
            followee_id: following.followee_id.0,
            created_at: following.created_at,
        }
    }
}

pub fn map_all<'a, E: 'a, D: From<&'a E>>(entities: &'a [E]) -> Vec<D> {
    entities.iter().map(D::from).collect()
}
