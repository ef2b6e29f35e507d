use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::display::GalleryCategory;
use models::gallery_image::{self, GalleryImagePatch, NewGalleryImage};

use crate::errors::ServiceError;

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn list(&self, category: Option<GalleryCategory>) -> Result<Vec<gallery_image::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<gallery_image::Model>, ServiceError>;
    async fn create(&self, input: NewGalleryImage) -> Result<gallery_image::Model, ServiceError>;
    async fn update(&self, id: Uuid, patch: GalleryImagePatch, image_path: Option<String>) -> Result<gallery_image::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

pub struct SeaOrmGalleryRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl GalleryRepository for SeaOrmGalleryRepository {
    async fn list(&self, category: Option<GalleryCategory>) -> Result<Vec<gallery_image::Model>, ServiceError> {
        Ok(gallery_image::list(&self.db, category).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<gallery_image::Model>, ServiceError> {
        Ok(gallery_image::find(&self.db, id).await?)
    }

    async fn create(&self, input: NewGalleryImage) -> Result<gallery_image::Model, ServiceError> {
        Ok(gallery_image::create(&self.db, input).await?)
    }

    async fn update(&self, id: Uuid, patch: GalleryImagePatch, image_path: Option<String>) -> Result<gallery_image::Model, ServiceError> {
        Ok(gallery_image::update(&self.db, id, patch, image_path).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(gallery_image::delete(&self.db, id).await?)
    }
}
