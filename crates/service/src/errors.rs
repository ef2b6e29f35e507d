use thiserror::Error;

use models::errors::ModelError;

use crate::blob::BlobError;

/// Failures surfaced by the resource services.
///
/// `Upload` guarantees no row was created or repointed. `RemoteQuery` covers
/// record operations and blob removal; the row may or may not have changed,
/// see the service docs for which side effects already happened.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upload error: {0}")]
    Upload(String),
    #[error("remote query error: {0}")]
    RemoteQuery(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::NotFound(m) => ServiceError::NotFound(m),
            ModelError::Db(m) => ServiceError::RemoteQuery(m),
        }
    }
}

impl From<BlobError> for ServiceError {
    fn from(e: BlobError) -> Self {
        ServiceError::RemoteQuery(e.to_string())
    }
}
