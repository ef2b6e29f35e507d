use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), log_format: default_log_format() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: true,
        }
    }
}

/// Which blob store backs record images.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Value sent as `cache-control` with every upload.
    #[serde(default = "default_cache_control")]
    pub cache_control: String,
    #[serde(default = "default_media_root")]
    pub root: String,
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default)]
    pub service_key: String,
    #[serde(default = "default_storage_timeout")]
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            cache_control: default_cache_control(),
            root: default_media_root(),
            public_base_url: default_public_base_url(),
            url: String::new(),
            bucket: default_bucket(),
            service_key: String::new(),
            timeout_secs: default_storage_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AdminConfig {
    #[serde(default)]
    pub api_keys: Vec<String>,
}

fn default_log_format() -> String { "compact".into() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }
fn default_cache_control() -> String { "3600".into() }
fn default_media_root() -> String { "data/media".into() }
fn default_public_base_url() -> String { "/media".into() }
fn default_bucket() -> String { "images".into() }
fn default_storage_timeout() -> u64 { 30 }

/// The file named by `CONFIG_PATH` (default `config.toml`), if it exists.
pub fn load_default() -> Result<Option<AppConfig>> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_optional(&path)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Read `path` if it exists. A missing file is `Ok(None)`; unreadable or
/// malformed files are errors.
pub fn load_optional(path: &str) -> Result<Option<AppConfig>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(anyhow!("cannot read config file {path}: {e}")),
    };
    parse(&content)
        .map(Some)
        .map_err(|e| anyhow!("invalid config file {path}: {e}"))
}

impl AppConfig {
    /// Config file if present, otherwise environment only. Validation applies either way.
    pub fn load_and_validate() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = load_default()?.unwrap_or_else(Self::from_env);
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Ok(fmt) = std::env::var("LOG_FORMAT") {
            cfg.server.log_format = fmt;
        }
        if let Ok(backend) = std::env::var("STORAGE_BACKEND") {
            if backend.eq_ignore_ascii_case("remote") {
                cfg.storage.backend = StorageBackend::Remote;
            }
        }
        if let Ok(url) = std::env::var("STORAGE_URL") {
            cfg.storage.url = url;
        }
        if let Ok(bucket) = std::env::var("STORAGE_BUCKET") {
            cfg.storage.bucket = bucket;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        self.admin.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        let fmt = self.log_format.trim().to_ascii_lowercase();
        if fmt != "compact" && fmt != "json" {
            return Err(anyhow!("server.log_format must be `compact` or `json`"));
        }
        self.log_format = fmt;
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl StorageConfig {
    /// Path under which the HTTP layer serves local files: `public_base_url`
    /// itself when relative, or its path component when absolute.
    pub fn media_mount(&self) -> Option<String> {
        if self.backend != StorageBackend::Local {
            return None;
        }
        let base = self.public_base_url.trim_end_matches('/');
        let path = match base.split_once("://") {
            Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or(""),
            None => base,
        };
        if path.is_empty() { None } else { Some(path.to_string()) }
    }

    pub fn normalize_from_env(&mut self) {
        if self.service_key.trim().is_empty() {
            if let Ok(key) = std::env::var("STORAGE_SERVICE_KEY") {
                self.service_key = key;
            }
        }
        self.public_base_url = self.public_base_url.trim_end_matches('/').to_string();
        self.url = self.url.trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_control.trim().is_empty() {
            return Err(anyhow!("storage.cache_control must not be empty"));
        }
        match self.backend {
            StorageBackend::Local => {
                if self.root.trim().is_empty() {
                    return Err(anyhow!("storage.root is required for the local backend"));
                }
                let lower = self.public_base_url.to_lowercase();
                let absolute = lower.starts_with("http://") || lower.starts_with("https://");
                if !absolute && !self.public_base_url.starts_with('/') {
                    return Err(anyhow!("storage.public_base_url must be an absolute URL or start with `/`"));
                }
                if self.media_mount().is_none() {
                    return Err(anyhow!("storage.public_base_url needs a non-root path such as `/media`"));
                }
            }
            StorageBackend::Remote => {
                let lower = self.url.to_lowercase();
                if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                    return Err(anyhow!("storage.url must start with http(s) for the remote backend"));
                }
                if self.bucket.trim().is_empty() {
                    return Err(anyhow!("storage.bucket is required for the remote backend"));
                }
                if self.service_key.trim().is_empty() {
                    return Err(anyhow!("storage.service_key is empty; set it in config.toml or STORAGE_SERVICE_KEY"));
                }
                if self.timeout_secs == 0 {
                    return Err(anyhow!("storage.timeout_secs must be positive"));
                }
            }
        }
        Ok(())
    }
}

impl AdminConfig {
    pub fn normalize_from_env(&mut self) {
        if self.api_keys.is_empty() {
            if let Ok(keys) = std::env::var("ADMIN_API_KEYS") {
                self.api_keys = keys.split(',').map(|k| k.trim().to_string()).collect();
            }
        }
        self.api_keys.retain(|k| !k.trim().is_empty());
    }
}
