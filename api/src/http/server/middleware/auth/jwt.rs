use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use uuid::Uuid;

use super::entities::{AuthError, Claims, UserIdentity};

/// Validates HS256 bearer tokens signed with the shared secret.
#[derive(Clone)]
pub struct JwtAuthRepository {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAuthRepository {
    pub fn new(secret_key: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret_key.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn identify(&self, token: &str) -> Result<UserIdentity, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        let user_id = Uuid::try_parse(&data.claims.sub)
            .map_err(|_| AuthError::InvalidSubject(data.claims.sub.clone()))?;

        Ok(UserIdentity { user_id })
    }
}
