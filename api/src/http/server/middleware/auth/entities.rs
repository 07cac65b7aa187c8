use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated caller, inserted into request extensions by
/// [`super::AuthMiddleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, a UUID.
    pub sub: String,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("subject is not a valid user id: {0}")]
    InvalidSubject(String),
}
