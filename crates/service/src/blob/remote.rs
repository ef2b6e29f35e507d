use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use tracing::debug;

use super::{validate_name, BlobError, BlobStore, UploadOptions};

/// Client for a Supabase-style storage REST API.
#[derive(Debug, Clone)]
pub struct RemoteBlobStore {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl RemoteBlobStore {
    pub fn new(base_url: &str, bucket: &str, service_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            service_key: service_key.to_string(),
        })
    }

    fn object_endpoint(&self, name: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, name)
    }

    fn bucket_endpoint(&self) -> String {
        format!("{}/storage/v1/object/{}", self.base_url, self.bucket)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.bearer_auth(&self.service_key).header("apikey", &self.service_key)
    }
}

async fn check(resp: reqwest::Response, name: &str) -> Result<(), BlobError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::CONFLICT || body.contains("Duplicate") {
        return Err(BlobError::AlreadyExists(name.to_string()));
    }
    Err(BlobError::Rejected { status: status.as_u16(), body })
}

#[async_trait]
impl BlobStore for RemoteBlobStore {
    async fn upload(&self, name: &str, bytes: Vec<u8>, opts: &UploadOptions) -> Result<(), BlobError> {
        validate_name(name)?;
        let size = bytes.len();
        let req = self
            .client
            .post(self.object_endpoint(name))
            .header(CONTENT_TYPE, &opts.content_type)
            .header(CACHE_CONTROL, format!("max-age={}", opts.cache_control))
            .header("x-upsert", opts.upsert.to_string())
            .body(bytes);
        let resp = self
            .authorized(req)
            .send()
            .await
            .map_err(|e| BlobError::Transport(e.to_string()))?;
        check(resp, name).await?;
        debug!(object = %name, size, "uploaded remote object");
        Ok(())
    }

    async fn remove(&self, names: &[String]) -> Result<(), BlobError> {
        if names.is_empty() {
            return Ok(());
        }
        for name in names {
            validate_name(name)?;
        }
        let req = self
            .client
            .delete(self.bucket_endpoint())
            .json(&serde_json::json!({ "prefixes": names }));
        let resp = self
            .authorized(req)
            .send()
            .await
            .map_err(|e| BlobError::Transport(e.to_string()))?;
        check(resp, &names.join(",")).await
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, self.bucket, name)
    }
}
