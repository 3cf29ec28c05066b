use super::model::{seed_sessions, ChatSession, Message, Sessions};
use crate::error::{ChatkeepError, Result};
use crate::persist::{PersistHandle, WriteBehind};
use crate::reactive::{Observable, Subscription};
use crate::storage::StorageBackend;

use std::fmt;
use std::sync::Arc;

/// Key under which the session mapping is persisted.
pub const SESSIONS_STORAGE_KEY: &str = "chat-sessions";

/// Reactive, persisted mapping from session id to session.
///
/// Every mutation goes through [`SessionStore::update`]: the new mapping
/// replaces the old one, subscribers are notified before the call returns,
/// and the full mapping is handed to the backing store. Clones share state.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Observable<Sessions>,
    writer: WriteBehind,
}

impl SessionStore {
    pub fn open(backend: Arc<dyn StorageBackend>) -> Self {
        Self::open_with_key(backend, SESSIONS_STORAGE_KEY)
    }

    /// Loads the mapping stored under `key`, or seeds the default session.
    ///
    /// Read and decode failures are logged and fall back to the seed.
    pub fn open_with_key(backend: Arc<dyn StorageBackend>, key: &str) -> Self {
        let writer = WriteBehind::new(backend, key);
        let initial = Self::load(&writer);

        Self {
            sessions: Observable::new(initial),
            writer,
        }
    }

    fn load(writer: &WriteBehind) -> Sessions {
        let key = writer.key();
        match writer.backend().read(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Sessions>(&raw) {
                Ok(sessions) => {
                    tracing::debug!(key, count = sessions.len(), "loaded persisted sessions");
                    sessions
                }
                Err(e) => {
                    tracing::warn!(key, error = %e, "persisted sessions are unreadable, starting fresh");
                    seed_sessions()
                }
            },
            Ok(None) => {
                tracing::debug!(key, "no persisted sessions, seeding default session");
                seed_sessions()
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read persisted sessions, starting fresh");
                seed_sessions()
            }
        }
    }

    pub fn storage_key(&self) -> &str {
        self.writer.key()
    }

    /// Clone of the whole mapping.
    pub fn snapshot(&self) -> Sessions {
        self.sessions.get()
    }

    pub fn get(&self, id: &str) -> Option<ChatSession> {
        self.sessions.with(|sessions| sessions.get(id).cloned())
    }

    pub fn resolve(&self, id: &str) -> Result<ChatSession> {
        self.get(id)
            .ok_or_else(|| ChatkeepError::SessionNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.with(|sessions| sessions.contains_key(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.with(|sessions| sessions.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls `callback` now and after every mutation.
    pub fn subscribe(&self, callback: impl Fn(&Sessions) + 'static) -> Subscription {
        self.sessions.subscribe(callback)
    }

    /// Replaces the mapping with `f(current)`, notifies, then persists it.
    pub fn update(&self, f: impl FnOnce(Sessions) -> Sessions) -> PersistHandle {
        self.sessions.update(f);
        self.persist()
    }

    pub fn set(&self, sessions: Sessions) -> PersistHandle {
        self.sessions.set(sessions);
        self.persist()
    }

    /// Inserts `session`, replacing any session with the same id.
    pub fn insert(&self, session: ChatSession) -> PersistHandle {
        self.update(move |mut sessions| {
            sessions.insert(session.id.clone(), session);
            sessions
        })
    }

    /// Appends `message` to the end of session `id`.
    pub fn append_message(&self, id: &str, message: Message) -> Result<PersistHandle> {
        if !self.contains(id) {
            return Err(ChatkeepError::SessionNotFound(id.to_string()));
        }

        Ok(self.update(|mut sessions| {
            if let Some(session) = sessions.get_mut(id) {
                session.messages.push(message);
            }
            sessions
        }))
    }

    /// Writes the current mapping on the calling thread.
    pub fn flush(&self) -> Result<()> {
        self.sessions
            .with(|sessions| self.writer.write_now(sessions))
    }

    fn persist(&self) -> PersistHandle {
        self.sessions.with(|sessions| self.writer.schedule(sessions))
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("key", &self.storage_key())
            .field("sessions", &self.len())
            .finish()
    }
}
