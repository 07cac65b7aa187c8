use axum::{
    Extension, Json,
    extract::{Path, State},
};
use gighub_core::domain::{
    following::{entities::CreateFollowingRequest, ports::FollowingService},
    user::entities::UserId,
};
use uuid::Uuid;

use crate::http::{
    dto::{FollowingDto, UserDto, map_all},
    server::{ApiError, AppState, Response, middleware::auth::entities::UserIdentity},
};

#[utoipa::path(
    get,
    path = "/followings",
    tag = "followings",
    responses(
        (status = 200, description = "Artists the caller follows", body = Vec<UserDto>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_followed_artists(
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
) -> Result<Response<Vec<UserDto>>, ApiError> {
    let follower_id = UserId::from(user_identity.user_id);
    let artists = state.service.get_followed_artists(&follower_id).await?;

    Ok(Response::ok(map_all(&artists)))
}

#[utoipa::path(
    post,
    path = "/followings",
    tag = "followings",
    request_body = CreateFollowingRequest,
    responses(
        (status = 201, description = "Artist followed", body = FollowingDto),
        (status = 400, description = "Bad request - Already following"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn follow(
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
    Json(request): Json<CreateFollowingRequest>,
) -> Result<Response<FollowingDto>, ApiError> {
    let follower_id = UserId::from(user_identity.user_id);
    let following = state
        .service
        .follow(&follower_id, &request.followee_id)
        .await?;

    Ok(Response::created(FollowingDto::from(&following)))
}

#[utoipa::path(
    delete,
    path = "/followings/{followee_id}",
    tag = "followings",
    params(
        ("followee_id" = String, Path, description = "ID of the artist to unfollow")
    ),
    responses(
        (status = 200, description = "Artist unfollowed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Following not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn unfollow(
    Path(followee_id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
) -> Result<Response<()>, ApiError> {
    let follower_id = UserId::from(user_identity.user_id);
    state
        .service
        .unfollow(&follower_id, &UserId::from(followee_id))
        .await?;

    Ok(Response::deleted(()))
}
