use std::path::PathBuf;

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

use super::{validate_name, BlobError, BlobStore, UploadOptions};

/// Filesystem-backed store. Files are served by the HTTP layer under
/// `public_base_url`, so content type comes from the extension there.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new<P: Into<PathBuf>>(root: P, public_base_url: &str) -> Self {
        Self { root: root.into(), public_base_url: public_base_url.trim_end_matches('/').to_string() }
    }

    pub fn root(&self) -> &PathBuf { &self.root }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, name: &str, bytes: Vec<u8>, opts: &UploadOptions) -> Result<(), BlobError> {
        validate_name(name)?;
        fs::create_dir_all(&self.root).await.map_err(|e| BlobError::Io(e.to_string()))?;
        let path = self.root.join(name);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(opts.upsert)
            .create_new(!opts.upsert)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => BlobError::AlreadyExists(name.to_string()),
                _ => BlobError::Io(e.to_string()),
            })?;
        file.write_all(&bytes).await.map_err(|e| BlobError::Io(e.to_string()))?;
        file.flush().await.map_err(|e| BlobError::Io(e.to_string()))?;
        debug!(object = %name, size = bytes.len(), content_type = %opts.content_type, "stored local object");
        Ok(())
    }

    async fn remove(&self, names: &[String]) -> Result<(), BlobError> {
        for name in names {
            validate_name(name)?;
            match fs::remove_file(self.root.join(name)).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(BlobError::Io(e.to_string())),
            }
        }
        Ok(())
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.public_base_url, name)
    }
}
