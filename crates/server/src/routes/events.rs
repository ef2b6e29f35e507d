use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::display::EventDisplay;
use models::event::{self, EventPatch, NewEvent};

use crate::{errors::JsonApiError, multipart::ResourceForm, routes::parse_choice, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// `home`, `events` or `both`.
    pub display: Option<String>,
}

#[utoipa::path(
    get, path = "/api/events", tag = "events",
    params(ListQuery),
    responses(
        (status = 200, description = "Events by date", body = [crate::openapi::EventDoc]),
        (status = 400, description = "Unknown display target")
    )
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<event::Model>>, JsonApiError> {
    let filter: Option<EventDisplay> = parse_choice("display", q.display.as_deref())?;
    let rows = state.services.events.list(filter).await?;
    info!(count = rows.len(), "list events");
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/api/events/{id}", tag = "events",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::EventDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<event::Model>, JsonApiError> {
    Ok(Json(state.services.events.get(id).await?))
}

#[utoipa::path(
    post, path = "/admin/events", tag = "events",
    request_body(content = crate::openapi::EventFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created", body = crate::openapi::EventDoc),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Upload Failed")
    )
)]
pub async fn create(State(state): State<ServerState>, multipart: Multipart) -> Result<(StatusCode, Json<event::Model>), JsonApiError> {
    let form = ResourceForm::read(multipart).await?;
    let input: NewEvent = form.input(&[])?;
    let created = state.services.events.create(input, form.image).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/admin/events/{id}", tag = "events",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body(content = crate::openapi::EventFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::EventDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Upload Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<event::Model>, JsonApiError> {
    let form = ResourceForm::read(multipart).await?;
    let patch: EventPatch = form.input(&[])?;
    Ok(Json(state.services.events.update(id, patch, form.image).await?))
}

#[utoipa::path(
    delete, path = "/admin/events/{id}", tag = "events",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.services.events.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
