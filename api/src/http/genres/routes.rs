use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    genres::handlers::{__path_list_genres, list_genres},
    server::AppState,
};

pub fn genre_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_genres))
}
