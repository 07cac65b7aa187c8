use axum::{Extension, extract::State};
use gighub_core::domain::genre::ports::GenreService;

use crate::http::{
    dto::{GenreDto, map_all},
    server::{ApiError, AppState, Response, middleware::auth::entities::UserIdentity},
};

#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "All genres, by name", body = Vec<GenreDto>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_genres(
    State(state): State<AppState>,
    Extension(_user_identity): Extension<UserIdentity>,
) -> Result<Response<Vec<GenreDto>>, ApiError> {
    let genres = state.service.get_genres().await?;

    Ok(Response::ok(map_all(&genres)))
}
