//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::info;

/// Ensure the local media directory exists before the blob store writes into it.
pub async fn ensure_media_dir(media_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(media_dir).await.is_err() {
        info!(%media_dir, "creating local media directory");
    }
    tokio::fs::create_dir_all(media_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {media_dir}: {e}"))?;
    Ok(())
}
