use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::activity::{self, ActivityPatch, NewActivity};
use models::display::ActivityDisplay;

use crate::errors::ServiceError;

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn list(&self, filter: Option<ActivityDisplay>) -> Result<Vec<activity::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<activity::Model>, ServiceError>;
    async fn create(&self, input: NewActivity) -> Result<activity::Model, ServiceError>;
    async fn update(&self, id: Uuid, patch: ActivityPatch, image_path: Option<String>) -> Result<activity::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

pub struct SeaOrmActivityRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ActivityRepository for SeaOrmActivityRepository {
    async fn list(&self, filter: Option<ActivityDisplay>) -> Result<Vec<activity::Model>, ServiceError> {
        Ok(activity::list(&self.db, filter).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<activity::Model>, ServiceError> {
        Ok(activity::find(&self.db, id).await?)
    }

    async fn create(&self, input: NewActivity) -> Result<activity::Model, ServiceError> {
        Ok(activity::create(&self.db, input).await?)
    }

    async fn update(&self, id: Uuid, patch: ActivityPatch, image_path: Option<String>) -> Result<activity::Model, ServiceError> {
        Ok(activity::update(&self.db, id, patch, image_path).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(activity::delete(&self.db, id).await?)
    }
}
