use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::display::{ActivityDisplay, DisplayTarget};
use crate::{errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub display_on: ActivityDisplay,
    pub image_path: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    pub title: String,
    pub description: String,
    pub display_on: ActivityDisplay,
    #[serde(default)]
    pub image_path: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub display_on: Option<ActivityDisplay>,
}

pub fn validate_new(input: &NewActivity) -> Result<(), errors::ModelError> {
    validate::required("title", &input.title, validate::MAX_TITLE_LEN)?;
    validate::required("description", &input.description, usize::MAX)
}

pub fn validate_patch(patch: &ActivityPatch) -> Result<(), errors::ModelError> {
    if let Some(t) = &patch.title { validate::required("title", t, validate::MAX_TITLE_LEN)?; }
    if let Some(d) = &patch.description { validate::required("description", d, usize::MAX)?; }
    Ok(())
}

/// Newest first.
pub async fn list(db: &DatabaseConnection, filter: Option<ActivityDisplay>) -> Result<Vec<Model>, errors::ModelError> {
    let mut q = Entity::find();
    if let Some(target) = filter {
        q = q.filter(Column::DisplayOn.is_in(target.selection()));
    }
    Ok(q.order_by_desc(Column::CreatedAt).all(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn create(db: &DatabaseConnection, input: NewActivity) -> Result<Model, errors::ModelError> {
    validate_new(&input)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        display_on: Set(input.display_on),
        image_path: Set(validate::blank_to_none(input.image_path)),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    patch: ActivityPatch,
    image_path: Option<String>,
) -> Result<Model, errors::ModelError> {
    validate_patch(&patch)?;
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::NotFound(format!("activity {id}")))?
        .into();
    if let Some(v) = patch.title { found.title = Set(v); }
    if let Some(v) = patch.description { found.description = Set(v); }
    if let Some(v) = patch.display_on { found.display_on = Set(v); }
    if let Some(v) = image_path { found.image_path = Set(Some(v)); }
    Ok(found.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
