use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Scopes the registration checkpoint and the dashboard state, like a browser tab.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| SessionId(value.to_string()))
            .ok_or((StatusCode::BAD_REQUEST, "missing x-session-id header"))
    }
}

/// Per-session values that expire after `idle_after` without a request. The map never
/// holds more than `max_sessions` entries: the least recently seen one makes room.
pub struct SessionSlots<T> {
    idle_after: Duration,
    max_sessions: usize,
    slots: Mutex<HashMap<String, Slot<T>>>,
}

struct Slot<T> {
    value: Arc<T>,
    last_seen: Instant,
}

impl<T> SessionSlots<T> {
    pub fn new(idle_after: Duration, max_sessions: usize) -> Self {
        Self {
            idle_after,
            max_sessions: max_sessions.max(1),
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_or_insert_with(&self, session_id: &str, make: impl FnOnce() -> T) -> Arc<T> {
        let now = Instant::now();
        let mut slots = self.slots.lock().await;
        let live = slots
            .get_mut(session_id)
            .filter(|slot| now.duration_since(slot.last_seen) < self.idle_after);
        if let Some(slot) = live {
            slot.last_seen = now;
            return slot.value.clone();
        }

        let before = slots.len();
        slots.retain(|_, slot| now.duration_since(slot.last_seen) < self.idle_after);
        if slots.len() >= self.max_sessions {
            let oldest = slots
                .iter()
                .min_by_key(|(_, slot)| slot.last_seen)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                slots.remove(&oldest);
            }
        }
        let evicted = before - slots.len();
        if evicted > 0 {
            debug!(evicted, "session state evicted");
        }

        let value = Arc::new(make());
        slots.insert(
            session_id.to_string(),
            Slot {
                value: value.clone(),
                last_seen: now,
            },
        );
        value
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }
}
