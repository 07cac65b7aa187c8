use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    followings::handlers::{
        __path_follow, __path_list_followed_artists, __path_unfollow, follow,
        list_followed_artists, unfollow,
    },
    server::AppState,
};

pub fn following_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_followed_artists, follow))
        .routes(routes!(unfollow))
}
