use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod activities;
pub mod admin;
pub mod events;
pub mod gallery;

/// Upper bound for admin request bodies, image included.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Parse an optional lowercase enum query value. Blank means "no filter".
pub(crate) fn parse_choice<T: DeserializeOwned>(name: &str, raw: Option<&str>) -> Result<Option<T>, JsonApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => serde_json::from_value(Value::String(v.to_ascii_lowercase()))
            .map(Some)
            .map_err(|_| JsonApiError::bad_request(format!("unknown {name}: {v}"))),
    }
}

/// Local blob directory and the URL path it is served under.
#[derive(Debug, Clone)]
pub struct MediaMount {
    pub path: String,
    pub dir: PathBuf,
}

/// Build the application router. `media` is set when images live on the
/// local filesystem.
pub fn build_router(state: ServerState, cors: CorsLayer, media: Option<MediaMount>) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/events", get(events::list))
        .route("/api/events/:id", get(events::get))
        .route("/api/activities", get(activities::list))
        .route("/api/activities/:id", get(activities::get))
        .route("/api/gallery", get(gallery::list))
        .route("/api/gallery/:id", get(gallery::get));

    let admin_routes = Router::new()
        .route("/admin/events", post(events::create))
        .route("/admin/events/:id", put(events::update).delete(events::delete))
        .route("/admin/activities", post(activities::create))
        .route("/admin/activities/:id", put(activities::update).delete(activities::delete))
        .route("/admin/gallery", post(gallery::create))
        .route("/admin/gallery/bulk-delete", post(gallery::bulk_delete))
        .route("/admin/gallery/:id", put(gallery::update).delete(gallery::delete))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin::require_api_key));

    let mut app = public
        .merge(admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    if let Some(MediaMount { path, dir }) = media {
        app = app.nest_service(&path, ServeDir::new(dir));
    }

    app.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
