// Session-scoped key/value storage.
//
// The browser analogue is `sessionStorage`: values live for one visitor session and are
// addressed by a fixed key. Every call is scoped by the session id the inbound layer
// resolved from the request.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionStorageError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn get_item(&self, session_id: &str, key: &str)
    -> Result<Option<String>, SessionStorageError>;

    async fn set_item(
        &self,
        session_id: &str,
        key: &str,
        value: String,
    ) -> Result<(), SessionStorageError>;

    async fn remove_item(&self, session_id: &str, key: &str) -> Result<(), SessionStorageError>;
}

pub mod in_memory;
