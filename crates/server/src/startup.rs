use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::{blob::build_blob_store, media::MediaLibrary, ContentServices};

use crate::routes::{self, MediaMount};
use crate::state::{AdminKeys, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: load configuration, then build and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate()?;
    run_with(cfg).await
}

pub async fn run_with(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }

    let media_mount = match cfg.storage.backend {
        StorageBackend::Local => {
            common::env::ensure_media_dir(&cfg.storage.root).await?;
            cfg.storage
                .media_mount()
                .map(|path| MediaMount { path, dir: PathBuf::from(&cfg.storage.root) })
        }
        StorageBackend::Remote => None,
    };
    let store = build_blob_store(&cfg.storage)?;
    let media = Arc::new(MediaLibrary::new(store, cfg.storage.cache_control.clone()));
    info!(backend = ?cfg.storage.backend, "blob store ready");

    let admin_keys = AdminKeys::new(cfg.admin.api_keys.iter().cloned());
    if admin_keys.is_empty() {
        warn!("no admin api keys configured; admin routes will reject every request");
    }

    let state = ServerState {
        services: ContentServices::seaorm(db, media),
        admin_keys: Arc::new(admin_keys),
    };
    let app: Router = routes::build_router(state, build_cors(), media_mount);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
