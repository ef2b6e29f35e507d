use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use models::display::GalleryCategory;
use models::gallery_image::{self, GalleryImagePatch, NewGalleryImage};

use crate::errors::ServiceError;
use crate::gallery::repository::GalleryRepository;
use crate::media::{ImageUpload, MediaLibrary};

/// Result of one id in a bulk delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkDeleteOutcome {
    pub id: Uuid,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Gallery images always own a blob, so creation requires one.
pub struct GalleryService<R: GalleryRepository + ?Sized> {
    repo: Arc<R>,
    media: Arc<MediaLibrary>,
}

impl<R: GalleryRepository + ?Sized> GalleryService<R> {
    pub fn new(repo: Arc<R>, media: Arc<MediaLibrary>) -> Self { Self { repo, media } }

    pub async fn list(&self, category: Option<GalleryCategory>) -> Result<Vec<gallery_image::Model>, ServiceError> {
        let rows = self.repo.list(category).await?;
        Ok(rows.into_iter().map(|r| self.present(r)).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<gallery_image::Model, ServiceError> {
        let row = self.fetch(id).await?;
        Ok(self.present(row))
    }

    #[instrument(skip(self, input, image), fields(category = ?input.category, with_image = image.is_some()))]
    pub async fn create(&self, mut input: NewGalleryImage, image: Option<ImageUpload>) -> Result<gallery_image::Model, ServiceError> {
        gallery_image::validate_text(input.title.as_deref(), input.alt_text.as_deref())?;
        let uploaded = match image {
            Some(upload) => Some(self.media.upload(upload).await?),
            None if input.image_path.trim().is_empty() => {
                return Err(ServiceError::Validation("image is required".into()));
            }
            None => None,
        };
        if let Some(name) = &uploaded {
            input.image_path = name.clone();
        }
        let created = self.repo.create(input).await.map_err(|e| {
            if let Some(name) = &uploaded { self.media.report_orphan(name, &e); }
            e
        })?;
        info!(id = %created.id, "gallery image created");
        Ok(self.present(created))
    }

    #[instrument(skip(self, patch, image), fields(id = %id, with_image = image.is_some()))]
    pub async fn update(&self, id: Uuid, patch: GalleryImagePatch, image: Option<ImageUpload>) -> Result<gallery_image::Model, ServiceError> {
        gallery_image::validate_patch(&patch)?;
        let current = self.fetch(id).await?;
        let uploaded = match image {
            Some(upload) => Some(self.media.upload(upload).await?),
            None => None,
        };
        let updated = self.repo.update(id, patch, uploaded.clone()).await.map_err(|e| {
            if let Some(name) = &uploaded { self.media.report_orphan(name, &e); }
            e
        })?;
        if uploaded.is_some() {
            self.media.discard(&current.image_path).await;
        }
        info!(id = %updated.id, "gallery image updated");
        Ok(self.present(updated))
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let current = self.fetch(id).await?;
        self.media.remove(&current.image_path).await?;
        match self.repo.delete(id).await {
            Ok(true) => {
                info!(id = %id, "gallery image deleted");
                Ok(())
            }
            Ok(false) => Err(ServiceError::not_found("gallery image")),
            Err(e) => {
                error!(id = %id, reference = %current.image_path, error = %e, "row delete failed after image removal; dangling reference");
                Err(e)
            }
        }
    }

    /// Sequential, in caller order. Failures are recorded and the loop moves
    /// on; earlier deletions stay deleted.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn bulk_delete(&self, ids: &[Uuid]) -> Vec<BulkDeleteOutcome> {
        let mut outcomes = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.delete(id).await {
                Ok(()) => outcomes.push(BulkDeleteOutcome { id, ok: true, error: None }),
                Err(e) => {
                    warn!(id = %id, error = %e, "bulk delete item failed");
                    outcomes.push(BulkDeleteOutcome { id, ok: false, error: Some(e.to_string()) });
                }
            }
        }
        let failed = outcomes.iter().filter(|o| !o.ok).count();
        info!(deleted = outcomes.len() - failed, failed, "gallery bulk delete finished");
        outcomes
    }

    async fn fetch(&self, id: Uuid) -> Result<gallery_image::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("gallery image"))
    }

    fn present(&self, mut row: gallery_image::Model) -> gallery_image::Model {
        if let Some(url) = self.media.resolve(Some(&row.image_path)) {
            row.image_path = url;
        }
        row
    }
}
