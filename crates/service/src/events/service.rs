use std::sync::Arc;

use tracing::{error, info, instrument};
use uuid::Uuid;

use models::display::EventDisplay;
use models::event::{self, EventPatch, NewEvent};

use crate::errors::ServiceError;
use crate::events::repository::EventRepository;
use crate::media::{ImageUpload, MediaLibrary};

/// Event CRUD plus the image lifecycle.
///
/// Returned records carry a normalized URL in `image_path`; see [`crate::media`].
pub struct EventService<R: EventRepository + ?Sized> {
    repo: Arc<R>,
    media: Arc<MediaLibrary>,
}

impl<R: EventRepository + ?Sized> EventService<R> {
    pub fn new(repo: Arc<R>, media: Arc<MediaLibrary>) -> Self { Self { repo, media } }

    pub async fn list(&self, filter: Option<EventDisplay>) -> Result<Vec<event::Model>, ServiceError> {
        let rows = self.repo.list(filter).await?;
        Ok(rows.into_iter().map(|r| self.present(r)).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<event::Model, ServiceError> {
        let row = self.fetch(id).await?;
        Ok(self.present(row))
    }

    /// Upload first, insert second. An insert failure leaves the upload orphaned.
    #[instrument(skip(self, input, image), fields(title = %input.title, with_image = image.is_some()))]
    pub async fn create(&self, mut input: NewEvent, image: Option<ImageUpload>) -> Result<event::Model, ServiceError> {
        event::validate_new(&input)?;
        let uploaded = match image {
            Some(upload) => Some(self.media.upload(upload).await?),
            None => None,
        };
        if let Some(name) = &uploaded {
            input.image_path = Some(name.clone());
        }
        let created = match self.repo.create(input).await {
            Ok(m) => m,
            Err(e) => {
                if let Some(name) = &uploaded { self.media.report_orphan(name, &e); }
                return Err(e);
            }
        };
        info!(id = %created.id, "event created");
        Ok(self.present(created))
    }

    /// With a new image: upload, repoint the row, then drop the old blob best-effort.
    #[instrument(skip(self, patch, image), fields(id = %id, with_image = image.is_some()))]
    pub async fn update(&self, id: Uuid, patch: EventPatch, image: Option<ImageUpload>) -> Result<event::Model, ServiceError> {
        event::validate_patch(&patch)?;
        let current = self.fetch(id).await?;
        let uploaded = match image {
            Some(upload) => Some(self.media.upload(upload).await?),
            None => None,
        };
        let updated = match self.repo.update(id, patch, uploaded.clone()).await {
            Ok(m) => m,
            Err(e) => {
                if let Some(name) = &uploaded { self.media.report_orphan(name, &e); }
                return Err(e);
            }
        };
        if uploaded.is_some() {
            if let Some(old) = current.image_path.as_deref() {
                self.media.discard(old).await;
            }
        }
        info!(id = %updated.id, "event updated");
        Ok(self.present(updated))
    }

    /// Blob first, then row. A failed blob removal keeps the row.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let current = self.fetch(id).await?;
        if let Some(path) = current.image_path.as_deref() {
            self.media.remove(path).await?;
        }
        match self.repo.delete(id).await {
            Ok(true) => {
                info!(id = %id, "event deleted");
                Ok(())
            }
            Ok(false) => Err(ServiceError::not_found("event")),
            Err(e) => {
                if let Some(path) = current.image_path.as_deref() {
                    error!(id = %id, reference = %path, error = %e, "row delete failed after image removal; dangling reference");
                }
                Err(e)
            }
        }
    }

    async fn fetch(&self, id: Uuid) -> Result<event::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("event"))
    }

    fn present(&self, mut row: event::Model) -> event::Model {
        row.image_path = self.media.resolve(row.image_path.as_deref());
        row
    }
}
