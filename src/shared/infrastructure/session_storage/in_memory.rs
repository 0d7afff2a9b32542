use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::shared::infrastructure::session_storage::{SessionStorage, SessionStorageError};

#[derive(Default)]
pub struct InMemorySessionStorage {
    items: RwLock<HashMap<(String, String), String>>,
    is_offline: AtomicBool,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), SessionStorageError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(SessionStorageError::Unavailable(
                "Session storage offline".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn get_item(
        &self,
        session_id: &str,
        key: &str,
    ) -> Result<Option<String>, SessionStorageError> {
        self.ensure_online()?;
        let items = self.items.read().await;
        Ok(items
            .get(&(session_id.to_string(), key.to_string()))
            .cloned())
    }

    async fn set_item(
        &self,
        session_id: &str,
        key: &str,
        value: String,
    ) -> Result<(), SessionStorageError> {
        self.ensure_online()?;
        self.items
            .write()
            .await
            .insert((session_id.to_string(), key.to_string()), value);
        Ok(())
    }

    async fn remove_item(&self, session_id: &str, key: &str) -> Result<(), SessionStorageError> {
        self.ensure_online()?;
        self.items
            .write()
            .await
            .remove(&(session_id.to_string(), key.to_string()));
        Ok(())
    }
}
