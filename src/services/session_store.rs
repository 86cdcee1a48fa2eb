// src/services/session_store.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;

#[derive(Clone, Debug)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: Instant,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub turns: Vec<Turn>,
    pub last_active: Instant,
}

impl Session {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            turns: Vec::new(),
            last_active: Instant::now(),
        }
    }
}

/// Conversation history per caller-supplied session id. Sessions idle
/// longer than the ttl are dropped by `purge_expired`.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    // Record one turn, creating the session on first use.
    pub async fn append_turn(
        &self,
        session_id: &str,
        role: TurnRole,
        content: impl Into<String>,
    ) -> usize {
        let mut guard = self.inner.write().await;
        let entry = guard
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id));
        entry.turns.push(Turn {
            role,
            content: content.into(),
            timestamp: Instant::now(),
        });
        entry.last_active = Instant::now();
        entry.turns.len()
    }

    /// Copy of the session history, oldest first.
    pub async fn history(&self, session_id: &str) -> Option<Vec<Turn>> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| s.turns.clone())
    }

    pub async fn remove(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Drop sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| now.duration_since(s.last_active) < self.ttl);
        before - guard.len()
    }

    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_creates_session_and_keeps_order() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert_eq!(store.append_turn("s1", TurnRole::User, "hello").await, 1);
        assert_eq!(store.append_turn("s1", TurnRole::Assistant, "hi").await, 2);

        let history = store.history("s1").await.unwrap();
        assert_eq!(history[0].role, TurnRole::User);
        assert_eq!(history[1].content, "hi");
        assert!(store.remove("s1").await);
    }

    #[tokio::test]
    async fn purge_drops_idle_sessions() {
        let store = SessionStore::new(Duration::from_millis(10));
        store.append_turn("s1", TurnRole::User, "hello").await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 0);
    }
}
