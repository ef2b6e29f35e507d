//! Service layer for the community site content.
//! - One service per resource type: events, activities, gallery images.
//! - Record tables sit behind repository traits; images behind [`blob::BlobStore`].
//! - [`media`] owns the upload/unlink choreography and URL normalization.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub mod errors;
pub mod blob;
pub mod media;
pub mod events;
pub mod activities;
pub mod gallery;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
#[cfg(test)]
mod tests;

use activities::{ActivityRepository, ActivityService, SeaOrmActivityRepository};
use events::{EventRepository, EventService, SeaOrmEventRepository};
use gallery::{GalleryRepository, GalleryService, SeaOrmGalleryRepository};
use media::MediaLibrary;

/// The three resource services sharing one media library.
#[derive(Clone)]
pub struct ContentServices {
    pub events: Arc<EventService<dyn EventRepository>>,
    pub activities: Arc<ActivityService<dyn ActivityRepository>>,
    pub gallery: Arc<GalleryService<dyn GalleryRepository>>,
}

impl ContentServices {
    pub fn new(
        events: Arc<dyn EventRepository>,
        activities: Arc<dyn ActivityRepository>,
        gallery: Arc<dyn GalleryRepository>,
        media: Arc<MediaLibrary>,
    ) -> Self {
        Self {
            events: Arc::new(EventService::new(events, media.clone())),
            activities: Arc::new(ActivityService::new(activities, media.clone())),
            gallery: Arc::new(GalleryService::new(gallery, media)),
        }
    }

    /// Postgres-backed tables.
    pub fn seaorm(db: DatabaseConnection, media: Arc<MediaLibrary>) -> Self {
        Self::new(
            Arc::new(SeaOrmEventRepository { db: db.clone() }),
            Arc::new(SeaOrmActivityRepository { db: db.clone() }),
            Arc::new(SeaOrmGalleryRepository { db }),
            media,
        )
    }
}
