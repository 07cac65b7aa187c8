use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    attendances::handlers::{
        __path_attend, __path_list_attendances, __path_unattend, attend, list_attendances,
        unattend,
    },
    server::AppState,
};

pub fn attendance_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_attendances, attend))
        .routes(routes!(unattend))
}
