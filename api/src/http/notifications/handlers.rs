use axum::{Extension, extract::State};
use gighub_core::domain::{notification::ports::NotificationService, user::entities::UserId};

use crate::http::{
    dto::{NotificationDto, map_all},
    server::{ApiError, AppState, Response, middleware::auth::entities::UserIdentity},
};

#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    responses(
        (status = 200, description = "New notifications, newest first", body = Vec<NotificationDto>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_new_notifications(
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
) -> Result<Response<Vec<NotificationDto>>, ApiError> {
    let user_id = UserId::from(user_identity.user_id);
    let notifications = state.service.get_new_notifications(&user_id).await?;

    Ok(Response::ok(map_all(&notifications)))
}

#[utoipa::path(
    post,
    path = "/notifications/mark-as-read",
    tag = "notifications",
    responses(
        (status = 200, description = "Number of notifications marked as read", body = usize),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn mark_as_read(
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
) -> Result<Response<usize>, ApiError> {
    let user_id = UserId::from(user_identity.user_id);
    let marked = state.service.mark_as_read(&user_id).await?;

    Ok(Response::ok(marked))
}
