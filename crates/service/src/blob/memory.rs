use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::{validate_name, BlobError, BlobStore, UploadOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub cache_control: String,
}

/// In-process store with switchable failures, for tests and local demos.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: DashMap<String, StoredObject>,
    fail_uploads: AtomicBool,
    fail_removes: AtomicBool,
}

pub const MEMORY_PUBLIC_BASE: &str = "https://blobs.memory.test/public";

impl MemoryBlobStore {
    pub fn new() -> Self { Self::default() }

    pub fn contains(&self, name: &str) -> bool { self.objects.contains_key(name) }

    pub fn object(&self, name: &str) -> Option<StoredObject> {
        self.objects.get(name).map(|o| o.value().clone())
    }

    pub fn len(&self) -> usize { self.objects.len() }

    pub fn is_empty(&self) -> bool { self.objects.is_empty() }

    pub fn names(&self) -> Vec<String> {
        self.objects.iter().map(|e| e.key().clone()).collect()
    }

    pub fn fail_uploads(&self, fail: bool) { self.fail_uploads.store(fail, Ordering::SeqCst); }

    pub fn fail_removes(&self, fail: bool) { self.fail_removes.store(fail, Ordering::SeqCst); }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, name: &str, bytes: Vec<u8>, opts: &UploadOptions) -> Result<(), BlobError> {
        validate_name(name)?;
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(BlobError::Rejected { status: 503, body: "upload disabled".into() });
        }
        if !opts.upsert && self.objects.contains_key(name) {
            return Err(BlobError::AlreadyExists(name.to_string()));
        }
        self.objects.insert(
            name.to_string(),
            StoredObject { bytes, content_type: opts.content_type.clone(), cache_control: opts.cache_control.clone() },
        );
        Ok(())
    }

    async fn remove(&self, names: &[String]) -> Result<(), BlobError> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(BlobError::Rejected { status: 503, body: "remove disabled".into() });
        }
        for name in names {
            self.objects.remove(name);
        }
        Ok(())
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", MEMORY_PUBLIC_BASE, name)
    }
}
