//! Per-session state and the table that owns it.
//!
//! A session is created by the transport, moves to an active profile once one
//! is selected, and is dropped on close. Every turn of a session runs while
//! holding that session's lock, so turns never interleave.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use switchyard_core::SessionId;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    NoProfileSelected,
    ProfileActive { profile: String },
}

impl SessionState {
    pub fn active_profile(&self) -> Option<&str> {
        match self {
            SessionState::NoProfileSelected => None,
            SessionState::ProfileActive { profile } => Some(profile),
        }
    }
}

/// Mutable part of a session, only reachable through [`Session::lock`].
#[derive(Debug)]
pub struct SessionContext {
    pub state: SessionState,
    pub turns: u64,
}

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    inner: Mutex<SessionContext>,
    closed: AtomicBool,
}

impl Session {
    fn new(id: SessionId) -> Self {
        Self {
            id,
            inner: Mutex::new(SessionContext {
                state: SessionState::NoProfileSelected,
                turns: 0,
            }),
            closed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Wait for the session's turn lock.
    pub async fn lock(&self) -> MutexGuard<'_, SessionContext> {
        self.inner.lock().await
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

/// Session id → session. Sessions never contend with each other.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the session for `id`, creating it in `NoProfileSelected` if needed.
    pub async fn open(&self, id: &str) -> Arc<Session> {
        if let Some(session) = self.sessions.read().await.get(id) {
            return session.clone();
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                debug!(session = %id, "[Sessions] Opened");
                Arc::new(Session::new(id.to_string()))
            })
            .clone()
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Remove the session and flag it closed so an in-flight turn stops sending.
    pub async fn close(&self, id: &str) -> bool {
        match self.sessions.write().await.remove(id) {
            Some(session) => {
                session.close();
                debug!(session = %id, "[Sessions] Closed");
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_is_idempotent() {
        let table = SessionTable::new();
        let a = table.open("s1").await;
        let b = table.open("s1").await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(table.len().await, 1);
        assert_eq!(a.lock().await.state, SessionState::NoProfileSelected);
    }

    #[tokio::test]
    async fn close_flags_outstanding_handles() {
        let table = SessionTable::new();
        let held = table.open("s1").await;
        assert!(table.close("s1").await);
        assert!(held.is_closed());
        assert!(table.get("s1").await.is_none());
        assert!(!table.close("s1").await);
    }

    #[tokio::test]
    async fn reopening_after_close_starts_fresh() {
        let table = SessionTable::new();
        {
            let s = table.open("s1").await;
            s.lock().await.state = SessionState::ProfileActive { profile: "p".into() };
        }
        table.close("s1").await;
        let s = table.open("s1").await;
        assert!(!s.is_closed());
        assert_eq!(s.lock().await.state.active_profile(), None);
    }
}
