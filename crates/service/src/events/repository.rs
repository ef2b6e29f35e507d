use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::display::EventDisplay;
use models::event::{self, EventPatch, NewEvent};

use crate::errors::ServiceError;

/// Record table for events. Rows come back exactly as stored.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list(&self, filter: Option<EventDisplay>) -> Result<Vec<event::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<event::Model>, ServiceError>;
    async fn create(&self, input: NewEvent) -> Result<event::Model, ServiceError>;
    async fn update(&self, id: Uuid, patch: EventPatch, image_path: Option<String>) -> Result<event::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmEventRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl EventRepository for SeaOrmEventRepository {
    async fn list(&self, filter: Option<EventDisplay>) -> Result<Vec<event::Model>, ServiceError> {
        Ok(event::list(&self.db, filter).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<event::Model>, ServiceError> {
        Ok(event::find(&self.db, id).await?)
    }

    async fn create(&self, input: NewEvent) -> Result<event::Model, ServiceError> {
        Ok(event::create(&self.db, input).await?)
    }

    async fn update(&self, id: Uuid, patch: EventPatch, image_path: Option<String>) -> Result<event::Model, ServiceError> {
        Ok(event::update(&self.db, id, patch, image_path).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(event::delete(&self.db, id).await?)
    }
}
