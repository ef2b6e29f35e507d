//! Image references and the upload/unlink choreography shared by all resources.
//!
//! Rows store either a bare object name or, for legacy rows, an absolute URL.
//! The distinction is made once, when a stored value is read, through
//! [`ImageRef`]. Every record leaving a service carries a normalized URL in its
//! `image_path`; the row itself is never rewritten.

use std::{path::Path, sync::Arc};

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::blob::{BlobStore, UploadOptions};
use crate::errors::ServiceError;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An image as stored on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Bare(String),
    ResolvedUrl(String),
}

impl ImageRef {
    /// Decode a stored value. Blank values mean "no image". Absolute URLs and
    /// URLs under the store's own public prefix (which may be relative, such
    /// as `/media/`) are resolved references; anything else is an object name.
    pub fn from_stored(raw: &str, store: &dyn BlobStore) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let lower = raw.to_ascii_lowercase();
        let own_prefix = store.public_url("");
        if lower.starts_with("http://") || lower.starts_with("https://") || raw.starts_with(own_prefix.as_str()) {
            Some(ImageRef::ResolvedUrl(raw.to_string()))
        } else {
            Some(ImageRef::Bare(raw.to_string()))
        }
    }

    /// Directly fetchable URL without query parameters.
    pub fn normalize(&self, store: &dyn BlobStore) -> String {
        match self {
            ImageRef::ResolvedUrl(url) => strip_query(url).to_string(),
            ImageRef::Bare(name) => store.public_url(name),
        }
    }

    /// Object name in `store`, if this reference points into it.
    pub fn object_name(&self, store: &dyn BlobStore) -> Option<String> {
        match self {
            ImageRef::Bare(name) => Some(name.clone()),
            ImageRef::ResolvedUrl(url) => store.object_name(strip_query(url)),
        }
    }
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// An image received from an editor.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// `<uuid-v4>.<ext>`, keeping the original extension when it looks like one.
pub fn object_name_for(file_name: &str) -> String {
    let id = Uuid::new_v4();
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 10 && e.chars().all(|c| c.is_ascii_alphanumeric()));
    match ext {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Blob-side half of every resource service.
pub struct MediaLibrary {
    store: Arc<dyn BlobStore>,
    cache_control: String,
}

impl MediaLibrary {
    pub fn new(store: Arc<dyn BlobStore>, cache_control: impl Into<String>) -> Self {
        Self { store, cache_control: cache_control.into() }
    }

    pub fn store(&self) -> &Arc<dyn BlobStore> { &self.store }

    /// Upload under a fresh name; never overwrites. Returns the object name.
    #[instrument(skip(self, upload), fields(file = %upload.file_name, size = upload.bytes.len()))]
    pub async fn upload(&self, upload: ImageUpload) -> Result<String, ServiceError> {
        if upload.bytes.is_empty() {
            return Err(ServiceError::Validation("image file is empty".into()));
        }
        let name = object_name_for(&upload.file_name);
        let opts = UploadOptions {
            content_type: upload
                .content_type
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            cache_control: self.cache_control.clone(),
            upsert: false,
        };
        self.store
            .upload(&name, upload.bytes, &opts)
            .await
            .map_err(|e| ServiceError::Upload(e.to_string()))?;
        info!(object = %name, "image uploaded");
        Ok(name)
    }

    pub fn resolve(&self, stored: Option<&str>) -> Option<String> {
        stored
            .and_then(|raw| ImageRef::from_stored(raw, self.store.as_ref()))
            .map(|r| r.normalize(self.store.as_ref()))
    }

    /// Remove the blob behind a stored reference. References outside the
    /// store are skipped with a warning.
    pub async fn remove(&self, stored: &str) -> Result<(), ServiceError> {
        let Some(image) = ImageRef::from_stored(stored, self.store.as_ref()) else { return Ok(()) };
        match image.object_name(self.store.as_ref()) {
            Some(name) => {
                self.store.remove(&[name.clone()]).await?;
                info!(object = %name, "image removed");
                Ok(())
            }
            None => {
                warn!(reference = %stored, "image reference is outside the blob store; nothing removed");
                Ok(())
            }
        }
    }

    /// Best-effort removal of a blob no row points at any more.
    pub async fn discard(&self, stored: &str) {
        if let Err(e) = self.remove(stored).await {
            warn!(reference = %stored, error = %e, "failed to remove replaced image; object leaked");
        }
    }

    /// Log an upload that no row will reference.
    pub fn report_orphan(&self, name: &str, cause: &ServiceError) {
        error!(object = %name, error = %cause, "row write failed after upload; blob orphaned");
    }
}
