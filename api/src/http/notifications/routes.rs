use utoipa_axum::{router::OpenApiRouter, routes};

use crate::http::{
    notifications::handlers::{
        __path_list_new_notifications, __path_mark_as_read, list_new_notifications, mark_as_read,
    },
    server::AppState,
};

pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_new_notifications))
        .routes(routes!(mark_as_read))
}
