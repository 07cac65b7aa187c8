use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use gighub_core::domain::{
    gig::{
        entities::{GigId, GigInput, GigSearchQuery},
        ports::GigService,
    },
    user::entities::UserId,
};
use uuid::Uuid;

use crate::http::{
    dto::{GigDetailsDto, GigDto, map_all},
    server::{ApiError, AppState, Response, middleware::auth::entities::UserIdentity},
};

#[utoipa::path(
    get,
    path = "/gigs",
    tag = "gigs",
    params(
        GigSearchQuery
    ),
    responses(
        (status = 200, description = "Upcoming gigs, soonest first", body = Vec<GigDto>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state, _user_identity))]
pub async fn list_upcoming_gigs(
    State(state): State<AppState>,
    Extension(_user_identity): Extension<UserIdentity>,
    Query(search): Query<GigSearchQuery>,
) -> Result<Response<Vec<GigDto>>, ApiError> {
    let gigs = state
        .service
        .get_upcoming_gigs(search.query.as_deref())
        .await?;

    Ok(Response::ok(map_all(&gigs)))
}

#[utoipa::path(
    post,
    path = "/gigs",
    tag = "gigs",
    request_body = GigInput,
    responses(
        (status = 201, description = "Gig created and followers notified", body = GigDto),
        (status = 400, description = "Bad request - Blank venue, past date or unknown genre"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state, input))]
pub async fn create_gig(
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
    Json(input): Json<GigInput>,
) -> Result<Response<GigDto>, ApiError> {
    let artist_id = UserId::from(user_identity.user_id);
    let gig = state.service.create_gig(&artist_id, input).await?;

    Ok(Response::created(GigDto::from(&gig)))
}

#[utoipa::path(
    get,
    path = "/gigs/mine",
    tag = "gigs",
    responses(
        (status = 200, description = "Caller's upcoming gigs", body = Vec<GigDto>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_my_gigs(
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
) -> Result<Response<Vec<GigDto>>, ApiError> {
    let artist_id = UserId::from(user_identity.user_id);
    let gigs = state.service.get_artist_upcoming_gigs(&artist_id).await?;

    Ok(Response::ok(map_all(&gigs)))
}

#[utoipa::path(
    get,
    path = "/gigs/attending",
    tag = "gigs",
    responses(
        (status = 200, description = "Future gigs the caller attends, canceled ones included", body = Vec<GigDto>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_attending_gigs(
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
) -> Result<Response<Vec<GigDto>>, ApiError> {
    let user_id = UserId::from(user_identity.user_id);
    let gigs = state.service.get_gigs_user_is_attending(&user_id).await?;

    Ok(Response::ok(map_all(&gigs)))
}

#[utoipa::path(
    get,
    path = "/gigs/{id}",
    tag = "gigs",
    params(
        ("id" = String, Path, description = "Gig ID")
    ),
    responses(
        (status = 200, description = "Gig with the caller's attendance and following flags", body = GigDetailsDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Gig not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_gig(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
) -> Result<Response<GigDetailsDto>, ApiError> {
    let user_id = UserId::from(user_identity.user_id);
    let details = state
        .service
        .get_gig_details(&user_id, &GigId::from(id))
        .await?;

    Ok(Response::ok(GigDetailsDto::from(&details)))
}

#[utoipa::path(
    put,
    path = "/gigs/{id}",
    tag = "gigs",
    params(
        ("id" = String, Path, description = "Gig ID")
    ),
    request_body = GigInput,
    responses(
        (status = 200, description = "Gig updated and attendees notified", body = GigDto),
        (status = 400, description = "Bad request - Blank venue, past date or unknown genre"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Not the artist of the gig"),
        (status = 404, description = "Gig not found or canceled"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state, input))]
pub async fn update_gig(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
    Json(input): Json<GigInput>,
) -> Result<Response<GigDto>, ApiError> {
    let artist_id = UserId::from(user_identity.user_id);
    let gig = state
        .service
        .update_gig(&artist_id, &GigId::from(id), input)
        .await?;

    Ok(Response::ok(GigDto::from(&gig)))
}

#[utoipa::path(
    delete,
    path = "/gigs/{id}",
    tag = "gigs",
    params(
        ("id" = String, Path, description = "Gig ID")
    ),
    responses(
        (status = 200, description = "Gig canceled and attendees notified"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Not the artist of the gig"),
        (status = 404, description = "Gig not found or already canceled"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn cancel_gig(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
) -> Result<Response<()>, ApiError> {
    let artist_id = UserId::from(user_identity.user_id);
    state
        .service
        .cancel_gig(&artist_id, &GigId::from(id))
        .await?;

    Ok(Response::deleted(()))
}
