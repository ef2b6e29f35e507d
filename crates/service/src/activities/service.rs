use std::sync::Arc;

use tracing::{error, info, instrument};
use uuid::Uuid;

use models::activity::{self, ActivityPatch, NewActivity};
use models::display::ActivityDisplay;

use crate::activities::repository::ActivityRepository;
use crate::errors::ServiceError;
use crate::media::{ImageUpload, MediaLibrary};

pub struct ActivityService<R: ActivityRepository + ?Sized> {
    repo: Arc<R>,
    media: Arc<MediaLibrary>,
}

impl<R: ActivityRepository + ?Sized> ActivityService<R> {
    pub fn new(repo: Arc<R>, media: Arc<MediaLibrary>) -> Self { Self { repo, media } }

    pub async fn list(&self, filter: Option<ActivityDisplay>) -> Result<Vec<activity::Model>, ServiceError> {
        let rows = self.repo.list(filter).await?;
        Ok(rows.into_iter().map(|r| self.present(r)).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<activity::Model, ServiceError> {
        let row = self.fetch(id).await?;
        Ok(self.present(row))
    }

    #[instrument(skip(self, input, image), fields(title = %input.title, with_image = image.is_some()))]
    pub async fn create(&self, mut input: NewActivity, image: Option<ImageUpload>) -> Result<activity::Model, ServiceError> {
        activity::validate_new(&input)?;
        let uploaded = match image {
            Some(upload) => Some(self.media.upload(upload).await?),
            None => None,
        };
        if let Some(name) = &uploaded {
            input.image_path = Some(name.clone());
        }
        let created = self.repo.create(input).await.map_err(|e| {
            if let Some(name) = &uploaded { self.media.report_orphan(name, &e); }
            e
        })?;
        info!(id = %created.id, "activity created");
        Ok(self.present(created))
    }

    #[instrument(skip(self, patch, image), fields(id = %id, with_image = image.is_some()))]
    pub async fn update(&self, id: Uuid, patch: ActivityPatch, image: Option<ImageUpload>) -> Result<activity::Model, ServiceError> {
        activity::validate_patch(&patch)?;
        let current = self.fetch(id).await?;
        let uploaded = match image {
            Some(upload) => Some(self.media.upload(upload).await?),
            None => None,
        };
        let updated = self.repo.update(id, patch, uploaded.clone()).await.map_err(|e| {
            if let Some(name) = &uploaded { self.media.report_orphan(name, &e); }
            e
        })?;
        if let (Some(_), Some(old)) = (&uploaded, current.image_path.as_deref()) {
            self.media.discard(old).await;
        }
        info!(id = %updated.id, "activity updated");
        Ok(self.present(updated))
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let current = self.fetch(id).await?;
        if let Some(path) = current.image_path.as_deref() {
            self.media.remove(path).await?;
        }
        match self.repo.delete(id).await {
            Ok(true) => {
                info!(id = %id, "activity deleted");
                Ok(())
            }
            Ok(false) => Err(ServiceError::not_found("activity")),
            Err(e) => {
                if let Some(path) = current.image_path.as_deref() {
                    error!(id = %id, reference = %path, error = %e, "row delete failed after image removal; dangling reference");
                }
                Err(e)
            }
        }
    }

    async fn fetch(&self, id: Uuid) -> Result<activity::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("activity"))
    }

    fn present(&self, mut row: activity::Model) -> activity::Model {
        row.image_path = self.media.resolve(row.image_path.as_deref());
        row
    }
}
