use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    gig::entities::{Gig, GigId},
    user::entities::UserId,
};

/// A user's RSVP to a gig, keyed by `(gig_id, attendee_id)`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Attendance {
    pub gig_id: GigId,
    pub attendee_id: UserId,

    pub gig: Option<Gig>,
}

impl Attendance {
    pub fn new(gig_id: GigId, attendee_id: UserId) -> Self {
        Self {
            gig_id,
            attendee_id,
            gig: None,
        }
    }

    pub fn same_key(&self, other: &Attendance) -> bool {
        self.gig_id == other.gig_id && self.attendee_id == other.attendee_id
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAttendanceRequest {
    pub gig_id: GigId,
}
