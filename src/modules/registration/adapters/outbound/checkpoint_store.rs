use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::modules::registration::core::checkpoint::{
    PENDING_REGISTRATION_KEY, PendingRegistration,
};
use crate::shared::infrastructure::session_storage::{SessionStorage, SessionStorageError};

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error(transparent)]
    Storage(#[from] SessionStorageError),

    #[error("could not encode pending registration: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reads and writes the pending math registration as JSON under a fixed key.
#[derive(Clone)]
pub struct CheckpointStore {
    storage: Arc<dyn SessionStorage>,
}

impl CheckpointStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// A value that no longer decodes is removed and reported as absent.
    pub async fn load(
        &self,
        session_id: &str,
    ) -> Result<Option<PendingRegistration>, CheckpointError> {
        let Some(raw) = self
            .storage
            .get_item(session_id, PENDING_REGISTRATION_KEY)
            .await?
        else {
            return Ok(None);
        };
        match serde_json::from_str::<PendingRegistration>(&raw) {
            Ok(pending) => Ok(Some(pending)),
            Err(error) => {
                warn!(%session_id, %error, "discarding unreadable pending registration");
                self.clear(session_id).await?;
                Ok(None)
            }
        }
    }

    pub async fn save(
        &self,
        session_id: &str,
        pending: &PendingRegistration,
    ) -> Result<(), CheckpointError> {
        let raw = serde_json::to_string(pending)?;
        self.storage
            .set_item(session_id, PENDING_REGISTRATION_KEY, raw)
            .await?;
        Ok(())
    }

    pub async fn clear(&self, session_id: &str) -> Result<(), CheckpointError> {
        self.storage
            .remove_item(session_id, PENDING_REGISTRATION_KEY)
            .await?;
        Ok(())
    }
}
