use axum::{extract::FromRequestParts, http::request::Parts};

use crate::http::server::ApiError;
pub mod entities;
pub mod jwt;

pub use jwt::JwtAuthRepository;

pub struct AuthMiddleware;

impl FromRequestParts<JwtAuthRepository> for AuthMiddleware {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &JwtAuthRepository,
    ) -> Result<Self, Self::Rejection> {
        tracing::debug!(
            "Authentication middleware: checking request to {}",
            parts.uri
        );

        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or_else(|| {
                tracing::warn!("Authentication failed: Authorization header missing");
                ApiError::Unauthorized
            })?;

        let auth_value = auth_header.to_str().map_err(|e| {
            tracing::warn!(
                "Authentication failed: Authorization header is not valid UTF-8: {}",
                e
            );
            ApiError::Unauthorized
        })?;

        let token = auth_value.strip_prefix("Bearer ").ok_or_else(|| {
            tracing::warn!("Authentication failed: Authorization header doesn't start with 'Bearer '. Header value starts with: {:?}", &auth_value.chars().take(10).collect::<String>());
            ApiError::Unauthorized
        })?;

        tracing::debug!("Token extracted, length: {} chars", token.len());

        let user_identity = state.identify(token).map_err(|e| {
            tracing::warn!("Authentication failed: {}", e);
            ApiError::Unauthorized
        })?;

        tracing::debug!("Authentication successful for user: {}", user_identity.user_id);

        parts.extensions.insert(user_identity);
        Ok(Self)
    }
}
