use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::display::ActivityDisplay;
use models::activity::{self, ActivityPatch, NewActivity};

use crate::{errors::JsonApiError, multipart::ResourceForm, routes::parse_choice, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// `home`, `activities` or `both`.
    pub display: Option<String>,
}

#[utoipa::path(
    get, path = "/api/activities", tag = "activities",
    params(ListQuery),
    responses(
        (status = 200, description = "Newest first", body = [crate::openapi::ActivityDoc]),
        (status = 400, description = "Unknown display target")
    )
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<activity::Model>>, JsonApiError> {
    let filter: Option<ActivityDisplay> = parse_choice("display", q.display.as_deref())?;
    let rows = state.services.activities.list(filter).await?;
    info!(count = rows.len(), "list activities");
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/api/activities/{id}", tag = "activities",
    params(("id" = Uuid, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ActivityDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<activity::Model>, JsonApiError> {
    Ok(Json(state.services.activities.get(id).await?))
}

#[utoipa::path(
    post, path = "/admin/activities", tag = "activities",
    request_body(content = crate::openapi::ActivityFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created", body = crate::openapi::ActivityDoc),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Upload Failed")
    )
)]
pub async fn create(State(state): State<ServerState>, multipart: Multipart) -> Result<(StatusCode, Json<activity::Model>), JsonApiError> {
    let form = ResourceForm::read(multipart).await?;
    let input: NewActivity = form.input(&[])?;
    let created = state.services.activities.create(input, form.image).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/admin/activities/{id}", tag = "activities",
    params(("id" = Uuid, Path, description = "Activity ID")),
    request_body(content = crate::openapi::ActivityFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ActivityDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Upload Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<activity::Model>, JsonApiError> {
    let form = ResourceForm::read(multipart).await?;
    let patch: ActivityPatch = form.input(&[])?;
    Ok(Json(state.services.activities.update(id, patch, form.image).await?))
}

#[utoipa::path(
    delete, path = "/admin/activities/{id}", tag = "activities",
    params(("id" = Uuid, Path, description = "Activity ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.services.activities.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
