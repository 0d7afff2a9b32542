use thiserror::Error;

use crate::shared::infrastructure::backend::BackendError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("An entry with this name already exists")]
    AlreadyExists,
    #[error("Entry {0} not found")]
    NotFound(String),
    #[error("The general entry cannot be changed or deleted")]
    FallbackProtected,
    #[error("Could not load {0}")]
    Load(String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Backend(#[from] BackendError),
}
