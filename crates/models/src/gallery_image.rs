use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::display::GalleryCategory;
use crate::{errors, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gallery_image")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category: GalleryCategory,
    pub title: Option<String>,
    pub alt_text: Option<String>,
    pub image_path: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewGalleryImage {
    pub category: GalleryCategory,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Filled by the service after the upload; a pre-existing object name is also accepted.
    #[serde(default)]
    pub image_path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryImagePatch {
    pub category: Option<GalleryCategory>,
    pub title: Option<String>,
    pub alt_text: Option<String>,
}

/// Checks the caption fields only; the image is checked separately because it
/// may still be on its way to the blob store.
pub fn validate_text(title: Option<&str>, alt_text: Option<&str>) -> Result<(), errors::ModelError> {
    validate::optional("title", title, validate::MAX_TITLE_LEN)?;
    validate::optional("alt_text", alt_text, validate::MAX_SHORT_LEN)
}

pub fn validate_new(input: &NewGalleryImage) -> Result<(), errors::ModelError> {
    validate_text(input.title.as_deref(), input.alt_text.as_deref())?;
    validate::required("image_path", &input.image_path, 1024)
}

pub fn validate_patch(patch: &GalleryImagePatch) -> Result<(), errors::ModelError> {
    validate_text(patch.title.as_deref(), patch.alt_text.as_deref())
}

/// Newest first, optionally restricted to one category.
pub async fn list(db: &DatabaseConnection, category: Option<GalleryCategory>) -> Result<Vec<Model>, errors::ModelError> {
    let mut q = Entity::find();
    if let Some(c) = category {
        q = q.filter(Column::Category.eq(c));
    }
    Ok(q.order_by_desc(Column::CreatedAt).all(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn create(db: &DatabaseConnection, input: NewGalleryImage) -> Result<Model, errors::ModelError> {
    validate_new(&input)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        category: Set(input.category),
        title: Set(validate::blank_to_none(input.title)),
        alt_text: Set(validate::blank_to_none(input.alt_text)),
        image_path: Set(input.image_path),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

/// Empty `title`/`alt_text` in a patch clear the column.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    patch: GalleryImagePatch,
    image_path: Option<String>,
) -> Result<Model, errors::ModelError> {
    validate_patch(&patch)?;
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::NotFound(format!("gallery image {id}")))?
        .into();
    if let Some(v) = patch.category { found.category = Set(v); }
    if let Some(v) = patch.title { found.title = Set(validate::blank_to_none(Some(v))); }
    if let Some(v) = patch.alt_text { found.alt_text = Set(validate::blank_to_none(Some(v))); }
    if let Some(v) = image_path { found.image_path = Set(v); }
    Ok(found.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_image_needs_an_image() {
        let g = NewGalleryImage {
            category: GalleryCategory::Events,
            title: Some("Spring Fair".into()),
            alt_text: None,
            image_path: String::new(),
        };
        assert!(validate_new(&g).is_err());
        let g = NewGalleryImage { image_path: "a.jpg".into(), ..g };
        assert!(validate_new(&g).is_ok());
    }
}
