//! Object storage for record images.
//!
//! A [`BlobStore`] addresses objects by a flat name. Uploads never overwrite
//! unless `upsert` is set, and `public_url` is expected to return a canonical
//! URL without query parameters.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use configs::{StorageBackend, StorageConfig};

pub mod local;
pub mod remote;
#[cfg(any(test, feature = "memory"))]
pub mod memory;

pub use local::LocalBlobStore;
pub use remote::RemoteBlobStore;
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryBlobStore;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("object already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid object name: {0}")]
    InvalidName(String),
    #[error("storage io error: {0}")]
    Io(String),
    #[error("storage rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("storage transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub content_type: String,
    /// Max-age in seconds, as a string.
    pub cache_control: String,
    pub upsert: bool,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, name: &str, bytes: Vec<u8>, opts: &UploadOptions) -> Result<(), BlobError>;

    /// Removing a name that does not exist is not an error.
    async fn remove(&self, names: &[String]) -> Result<(), BlobError>;

    fn public_url(&self, name: &str) -> String;

    /// Inverse of [`public_url`](Self::public_url) for URLs minted by this store.
    fn object_name(&self, url: &str) -> Option<String> {
        let prefix = self.public_url("");
        let path = url.split('?').next().unwrap_or(url);
        path.strip_prefix(prefix.as_str())
            .filter(|n| validate_name(n).is_ok())
            .map(str::to_string)
    }
}

/// Object names are flat: no separators, no parent references.
pub fn validate_name(name: &str) -> Result<(), BlobError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(BlobError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Build the configured backend.
pub fn build_blob_store(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match cfg.backend {
        StorageBackend::Local => Arc::new(LocalBlobStore::new(&cfg.root, &cfg.public_base_url)),
        StorageBackend::Remote => Arc::new(RemoteBlobStore::new(
            &cfg.url,
            &cfg.bucket,
            &cfg.service_key,
            std::time::Duration::from_secs(cfg.timeout_secs),
        )?),
    };
    Ok(store)
}
