use std::{collections::HashSet, sync::Arc};

use service::ContentServices;

/// Admin API keys accepted by the admin routes.
#[derive(Debug, Default)]
pub struct AdminKeys(HashSet<String>);

impl AdminKeys {
    pub fn new<I: IntoIterator<Item = String>>(keys: I) -> Self {
        Self(keys.into_iter().filter(|k| !k.trim().is_empty()).collect())
    }

    pub fn contains(&self, key: &str) -> bool { self.0.contains(key) }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

#[derive(Clone)]
pub struct ServerState {
    pub services: ContentServices,
    pub admin_keys: Arc<AdminKeys>,
}
