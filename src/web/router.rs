//! Router configuration for the web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::handlers::{
    create_post, delete_post, download_file, edit_form, get_post, join, list_posts, login, logout,
    me, overlap_id_check, pass_check, update_me, update_post, AppState,
};
use super::middleware::create_cors_layer;
use super::openapi::ApiDoc;

/// Room for the text fields of a multipart post on top of the attachment.
const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let body_limit = usize::try_from(app_state.max_upload_size.saturating_add(FORM_OVERHEAD_BYTES))
        .unwrap_or(usize::MAX);

    let board_routes = Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:no", get(get_post).put(update_post).delete(delete_post))
        .route("/:no/edit", post(edit_form));

    let member_routes = Router::new()
        .route("/", post(join))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/overlap-id-check", get(overlap_id_check))
        .route("/pass-check", get(pass_check))
        .route("/me", get(me).put(update_me));

    let api_routes = Router::new()
        .nest("/boards", board_routes)
        .nest("/members", member_routes)
        .route("/files/:name", get(download_file));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
        .merge(create_health_router())
        .merge(create_openapi_router())
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Serve the OpenAPI document as JSON.
pub fn create_openapi_router() -> Router {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
