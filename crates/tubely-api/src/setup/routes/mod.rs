//! Route configuration and setup.
//!
//! Upload endpoints live under `/videos`; health checks in [health](health).

mod health;

use crate::handlers::{thumbnail_upload, video_upload};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::Config;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let assets = ServeDir::new(config.assets_root());

    tracing::info!(
        http_concurrency_limit = config.http_concurrency_limit(),
        "HTTP concurrency limit layer enabled"
    );

    let app = Router::new()
        .merge(health_routes())
        .merge(upload_routes(config))
        .nest_service("/assets", assets)
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit()))
        .layer(RequestBodyLimitLayer::new(
            config
                .max_video_size_bytes()
                .max(config.max_thumbnail_size_bytes()),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin {:?}: {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(health::liveness_check))
        .route("/readyz", get(health::readiness_check))
}

fn upload_routes(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/videos/{video_id}/thumbnail",
            post(thumbnail_upload::upload_thumbnail)
                .layer(DefaultBodyLimit::max(config.max_thumbnail_size_bytes())),
        )
        .route(
            "/videos/{video_id}/video",
            post(video_upload::upload_video)
                .layer(DefaultBodyLimit::max(config.max_video_size_bytes())),
        )
}
