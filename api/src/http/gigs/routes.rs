use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    gigs::handlers::{
        __path_cancel_gig, __path_create_gig, __path_get_gig, __path_list_attending_gigs,
        __path_list_my_gigs, __path_list_upcoming_gigs, __path_update_gig, cancel_gig, create_gig,
        get_gig, list_attending_gigs, list_my_gigs, list_upcoming_gigs, update_gig,
    },
    server::AppState,
};

pub fn gig_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_upcoming_gigs, create_gig))
        .routes(routes!(list_my_gigs))
        .routes(routes!(list_attending_gigs))
        .routes(routes!(get_gig, update_gig, cancel_gig))
}
