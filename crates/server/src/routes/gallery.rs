use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::display::GalleryCategory;
use models::gallery_image::{self, GalleryImagePatch, NewGalleryImage};
use service::gallery::BulkDeleteOutcome;

use crate::{errors::JsonApiError, multipart::ResourceForm, routes::parse_choice, state::ServerState};

/// Captions an editor may clear by submitting an empty field.
const CLEARABLE: &[&str] = &["title", "alt_text"];

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// `events`, `activities`, `community` or `facilities`.
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<Uuid>,
}

#[utoipa::path(
    get, path = "/api/gallery", tag = "gallery",
    params(ListQuery),
    responses(
        (status = 200, description = "Newest first", body = [crate::openapi::GalleryImageDoc]),
        (status = 400, description = "Unknown category")
    )
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<gallery_image::Model>>, JsonApiError> {
    let category: Option<GalleryCategory> = parse_choice("category", q.category.as_deref())?;
    let rows = state.services.gallery.list(category).await?;
    info!(count = rows.len(), "list gallery images");
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/api/gallery/{id}", tag = "gallery",
    params(("id" = Uuid, Path, description = "Gallery image ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::GalleryImageDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<gallery_image::Model>, JsonApiError> {
    Ok(Json(state.services.gallery.get(id).await?))
}

#[utoipa::path(
    post, path = "/admin/gallery", tag = "gallery",
    request_body(content = crate::openapi::GalleryFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created", body = crate::openapi::GalleryImageDoc),
        (status = 400, description = "Validation Error or missing image"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Upload Failed")
    )
)]
pub async fn create(State(state): State<ServerState>, multipart: Multipart) -> Result<(StatusCode, Json<gallery_image::Model>), JsonApiError> {
    let form = ResourceForm::read(multipart).await?;
    let input: NewGalleryImage = form.input(&[])?;
    let created = state.services.gallery.create(input, form.image).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/admin/gallery/{id}", tag = "gallery",
    params(("id" = Uuid, Path, description = "Gallery image ID")),
    request_body(content = crate::openapi::GalleryFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::GalleryImageDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Upload Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<gallery_image::Model>, JsonApiError> {
    let form = ResourceForm::read(multipart).await?;
    let patch: GalleryImagePatch = form.input(CLEARABLE)?;
    Ok(Json(state.services.gallery.update(id, patch, form.image).await?))
}

#[utoipa::path(
    delete, path = "/admin/gallery/{id}", tag = "gallery",
    params(("id" = Uuid, Path, description = "Gallery image ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.services.gallery.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Always 200; per-id failures are reported in the outcomes.
#[utoipa::path(
    post, path = "/admin/gallery/bulk-delete", tag = "gallery",
    request_body = crate::openapi::BulkDeleteRequestDoc,
    responses(
        (status = 200, description = "One outcome per id, in request order", body = [crate::openapi::BulkDeleteOutcomeDoc]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn bulk_delete(State(state): State<ServerState>, Json(req): Json<BulkDeleteRequest>) -> Json<Vec<BulkDeleteOutcome>> {
    Json(state.services.gallery.bulk_delete(&req.ids).await)
}
