use axum::{
    Extension, Json,
    extract::{Path, State},
};
use gighub_core::domain::{
    attendance::{entities::CreateAttendanceRequest, ports::AttendanceService},
    gig::entities::GigId,
    user::entities::UserId,
};
use uuid::Uuid;

use crate::http::{
    dto::{AttendanceDto, map_all},
    server::{ApiError, AppState, Response, middleware::auth::entities::UserIdentity},
};

#[utoipa::path(
    get,
    path = "/attendances",
    tag = "attendances",
    responses(
        (status = 200, description = "Caller's attendances to future gigs", body = Vec<AttendanceDto>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_attendances(
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
) -> Result<Response<Vec<AttendanceDto>>, ApiError> {
    let attendee_id = UserId::from(user_identity.user_id);
    let attendances = state.service.get_future_attendances(&attendee_id).await?;

    Ok(Response::ok(map_all(&attendances)))
}

#[utoipa::path(
    post,
    path = "/attendances",
    tag = "attendances",
    request_body = CreateAttendanceRequest,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceDto),
        (status = 400, description = "Bad request - Already attending"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Gig not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn attend(
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
    Json(request): Json<CreateAttendanceRequest>,
) -> Result<Response<AttendanceDto>, ApiError> {
    let attendee_id = UserId::from(user_identity.user_id);
    let attendance = state.service.attend(&attendee_id, &request.gig_id).await?;

    Ok(Response::created(AttendanceDto::from(&attendance)))
}

#[utoipa::path(
    delete,
    path = "/attendances/{gig_id}",
    tag = "attendances",
    params(
        ("gig_id" = String, Path, description = "ID of the gig to stop attending")
    ),
    responses(
        (status = 200, description = "Attendance removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Attendance not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn unattend(
    Path(gig_id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(user_identity): Extension<UserIdentity>,
) -> Result<Response<()>, ApiError> {
    let attendee_id = UserId::from(user_identity.user_id);
    state
        .service
        .unattend(&attendee_id, &GigId::from(gig_id))
        .await?;

    Ok(Response::deleted(()))
}
