use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::display::{DisplayTarget, EventDisplay};
use crate::{errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub date: Date,
    pub time: String,
    pub venue: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub display_on: EventDisplay,
    pub image_path: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields an editor supplies when creating an event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub date: Date,
    pub time: String,
    pub venue: String,
    pub description: String,
    pub display_on: EventDisplay,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// Partial update. `image_path` is absent on purpose: it only changes through an upload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<Date>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub display_on: Option<EventDisplay>,
}

pub fn validate_new(input: &NewEvent) -> Result<(), errors::ModelError> {
    validate::required("title", &input.title, validate::MAX_TITLE_LEN)?;
    validate::required("time", &input.time, 64)?;
    validate::required("venue", &input.venue, validate::MAX_TITLE_LEN)?;
    validate::required("description", &input.description, usize::MAX)?;
    Ok(())
}

pub fn validate_patch(patch: &EventPatch) -> Result<(), errors::ModelError> {
    if let Some(t) = &patch.title { validate::required("title", t, validate::MAX_TITLE_LEN)?; }
    if let Some(t) = &patch.time { validate::required("time", t, 64)?; }
    if let Some(v) = &patch.venue { validate::required("venue", v, validate::MAX_TITLE_LEN)?; }
    if let Some(d) = &patch.description { validate::required("description", d, usize::MAX)?; }
    Ok(())
}

/// Rows ordered by event date; `filter` keeps rows targeted at it or at both.
pub async fn list(db: &DatabaseConnection, filter: Option<EventDisplay>) -> Result<Vec<Model>, errors::ModelError> {
    let mut q = Entity::find();
    if let Some(target) = filter {
        q = q.filter(Column::DisplayOn.is_in(target.selection()));
    }
    let rows = q
        .order_by_asc(Column::Date)
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn create(db: &DatabaseConnection, input: NewEvent) -> Result<Model, errors::ModelError> {
    validate_new(&input)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        date: Set(input.date),
        time: Set(input.time),
        venue: Set(input.venue),
        description: Set(input.description),
        display_on: Set(input.display_on),
        image_path: Set(validate::blank_to_none(input.image_path)),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

/// Apply `patch`; `image_path = Some(..)` repoints the row at a new object.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    patch: EventPatch,
    image_path: Option<String>,
) -> Result<Model, errors::ModelError> {
    validate_patch(&patch)?;
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::NotFound(format!("event {id}")))?
        .into();
    if let Some(v) = patch.title { found.title = Set(v); }
    if let Some(v) = patch.date { found.date = Set(v); }
    if let Some(v) = patch.time { found.time = Set(v); }
    if let Some(v) = patch.venue { found.venue = Set(v); }
    if let Some(v) = patch.description { found.description = Set(v); }
    if let Some(v) = patch.display_on { found.display_on = Set(v); }
    if let Some(v) = image_path { found.image_path = Set(Some(v)); }
    Ok(found.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
