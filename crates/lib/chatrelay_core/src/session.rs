//! In-memory session store.
//!
//! Maps opaque session ids to conversation logs. Each log lives behind its
//! own `tokio::sync::Mutex` so the orchestrator can hold one session's lock
//! across the full read-snapshot → generate → append sequence, serializing
//! concurrent requests for the same session without blocking others.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::message::Message;

/// Session id used when the client does not supply one. Callers picking the
/// default deliberately share one conversation.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Shared handle to one session's conversation log.
pub type SessionHandle = Arc<Mutex<Vec<Message>>>;

/// Process-wide store of conversation logs, keyed by session id.
///
/// Sessions are created lazily on first use and live until [`clear`] or
/// process exit; there is no time- or memory-based eviction.
///
/// [`clear`]: SessionStore::clear
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session's log handle, inserting an empty log first if the
    /// session does not exist yet.
    pub fn get_or_create(&self, session_id: &str) -> SessionHandle {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }

    /// Removes the session entirely. No error if it did not exist; the next
    /// `get_or_create` starts fresh.
    pub fn clear(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    /// Number of live sessions (health metadata).
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Caps a conversation log at `max_len` entries, dropping from the front so
/// the most recent exchanges survive. A flat length cap, not pair-aware.
pub fn trim_history(log: &mut Vec<Message>, max_len: usize) {
    if log.len() > max_len {
        log.drain(..log.len() - max_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<Message> {
        (0..n).map(|i| Message::user(format!("m{i}"))).collect()
    }

    #[tokio::test]
    async fn get_or_create_persists_the_log() {
        let store = SessionStore::new();
        store
            .get_or_create("s1")
            .lock()
            .await
            .push(Message::user("hello"));

        let log = store.get_or_create("s1");
        assert_eq!(log.lock().await.len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn clear_removes_the_session() {
        let store = SessionStore::new();
        store
            .get_or_create("s1")
            .lock()
            .await
            .push(Message::user("hello"));

        store.clear("s1");
        assert!(store.is_empty());
        assert!(store.get_or_create("s1").lock().await.is_empty());
    }

    #[test]
    fn clear_of_unknown_session_is_a_noop() {
        let store = SessionStore::new();
        store.clear("never-seen");
        assert!(store.is_empty());
    }

    #[test]
    fn trim_keeps_the_newest_suffix() {
        let mut log = numbered(45);
        trim_history(&mut log, 40);

        assert_eq!(log.len(), 40);
        assert_eq!(log.first().unwrap().text, "m5");
        assert_eq!(log.last().unwrap().text, "m44");
    }

    #[test]
    fn trim_under_cap_is_a_noop() {
        let mut log = numbered(10);
        trim_history(&mut log, 40);
        assert_eq!(log, numbered(10));
    }

    #[test]
    fn trim_at_exact_cap_is_a_noop() {
        let mut log = numbered(40);
        trim_history(&mut log, 40);
        assert_eq!(log.len(), 40);
        assert_eq!(log.first().unwrap().text, "m0");
    }
}
