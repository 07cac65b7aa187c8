use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::entities::UserId;

/// A fan's subscription to an artist, keyed by `(follower_id, followee_id)`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Following {
    pub follower_id: UserId,
    pub followee_id: UserId,

    pub created_at: DateTime<Utc>,
}

impl Following {
    pub fn new(follower_id: UserId, followee_id: UserId) -> Self {
        Self {
            follower_id,
            followee_id,
            created_at: Utc::now(),
        }
    }

    pub fn same_key(&self, other: &Following) -> bool {
        self.follower_id == other.follower_id && self.followee_id == other.followee_id
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateFollowingRequest {
    pub followee_id: UserId,
}
