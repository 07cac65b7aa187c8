use std::net::SocketAddr;

use axum::{Router, http::HeaderValue};
use gighub_core::create_repositories;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    config::{Config, ServerConfig},
    http::{
        attendances::routes::attendance_routes,
        followings::routes::following_routes,
        genres::routes::genre_routes,
        gigs::routes::gig_routes,
        health::routes::health_routes,
        notifications::routes::notification_routes,
        server::{
            ApiError, AppState,
            middleware::auth::{AuthMiddleware, JwtAuthRepository},
        },
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GigHub API",
        description = "Artists post gigs, fans follow artists and attend gigs"
    ),
    tags(
        (name = "gigs", description = "Posting, browsing and canceling gigs"),
        (name = "attendances", description = "Going to gigs"),
        (name = "followings", description = "Following artists"),
        (name = "notifications", description = "Gig change notifications"),
        (name = "genres", description = "Music genres"),
    ),
    modifiers(&SecurityAddon),
    security(("bearer" = []))
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub struct App {
    config: Config,
    state: AppState,
    app_router: Router,
    health_router: Router,
}

impl App {
    pub async fn new(config: Config) -> Result<Self, ApiError> {
        let repositories = create_repositories(config.database.clone().into())
            .await
            .map_err(|e| ApiError::StartupError(e.to_string()))?;
        repositories
            .run_migrations()
            .await
            .map_err(|e| ApiError::StartupError(e.to_string()))?;
        info!("Database migrations applied");

        let state: AppState = repositories.into();
        let auth = JwtAuthRepository::new(&config.jwt.secret_key);
        let cors = cors_layer(&config.server)?;

        let app_router = api_router(state.clone(), auth, cors);
        let health_router = health_routes().with_state(state.clone());

        Ok(Self {
            config,
            state,
            app_router,
            health_router,
        })
    }

    pub fn app_router(&self) -> Router {
        self.app_router.clone()
    }

    pub async fn start(&self) -> Result<(), ApiError> {
        let api_addr = SocketAddr::from(([0, 0, 0, 0], self.config.server.api_port));
        let health_addr = SocketAddr::from(([0, 0, 0, 0], self.config.server.health_port));

        let api_listener = TcpListener::bind(api_addr)
            .await
            .map_err(|e| ApiError::StartupError(format!("Failed to bind {}: {}", api_addr, e)))?;
        let health_listener = TcpListener::bind(health_addr).await.map_err(|e| {
            ApiError::StartupError(format!("Failed to bind {}: {}", health_addr, e))
        })?;

        info!(
            environment = ?self.config.environment,
            "API listening on {}, health on {}", api_addr, health_addr
        );

        let api_server = axum::serve(api_listener, self.app_router.clone())
            .with_graceful_shutdown(shutdown_signal());
        let health_server = axum::serve(health_listener, self.health_router.clone())
            .with_graceful_shutdown(shutdown_signal());

        let result = tokio::try_join!(
            async { api_server.await },
            async { health_server.await }
        );

        self.state.shutdown().await;
        result.map_err(|e| ApiError::StartupError(e.to_string()))?;

        info!("Server stopped");
        Ok(())
    }
}

/// Every route except the OpenAPI reference requires a bearer token.
pub fn api_router(state: AppState, auth: JwtAuthRepository, cors: CorsLayer) -> Router {
    let (router, api) = OpenApiRouter::<AppState>::with_openapi(ApiDoc::openapi())
        .merge(gig_routes())
        .merge(attendance_routes())
        .merge(following_routes())
        .merge(notification_routes())
        .merge(genre_routes())
        .split_for_parts();

    router
        .route_layer(axum::middleware::from_extractor_with_state::<
            AuthMiddleware,
            JwtAuthRepository,
        >(auth))
        .merge(Scalar::with_url("/scalar", api))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ApiError> {
    match &config.cors_origin {
        Some(origin) => {
            let origin = origin.parse::<HeaderValue>().map_err(|e| {
                ApiError::StartupError(format!("Invalid CORS origin '{}': {}", origin, e))
            })?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any))
        }
        None => Ok(CorsLayer::permissive()),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
