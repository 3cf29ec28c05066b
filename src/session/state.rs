use super::model::{ChatSession, Message};
use super::pointer::CurrentSession;
use super::store::SessionStore;
use crate::error::{ChatkeepError, Result};
use crate::persist::PersistHandle;
use crate::storage::StorageBackend;

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

/// Source of fresh session identifiers.
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// Random v4 UUIDs. Collisions are not checked.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Result of [`ChatState::new_chat`].
#[derive(Debug)]
pub struct NewChat {
    pub id: String,
    /// Write of the mapping that now contains the new session
    pub persisted: PersistHandle,
}

/// Application-level chat state: the session store and the current-session
/// pointer, owned together by whatever sits at the root of the UI.
#[derive(Clone)]
pub struct ChatState {
    sessions: SessionStore,
    current: CurrentSession,
    ids: Rc<dyn IdGenerator>,
}

impl ChatState {
    pub fn new(sessions: SessionStore) -> Self {
        Self {
            sessions,
            current: CurrentSession::new(),
            ids: Rc::new(UuidGenerator),
        }
    }

    pub fn open(backend: Arc<dyn StorageBackend>) -> Self {
        Self::new(SessionStore::open(backend))
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Rc::new(ids);
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn current(&self) -> &CurrentSession {
        &self.current
    }

    /// Creates an empty session and makes it current.
    ///
    /// The store is updated (and its subscribers notified) before the
    /// pointer moves, so pointer subscribers can already resolve the new id.
    pub fn new_chat(&self) -> NewChat {
        let id = self.ids.generate();
        let persisted = self.sessions.insert(ChatSession::new(id.clone()));
        self.current.set(id.clone());

        tracing::info!(session_id = %id, "started new chat");
        NewChat { id, persisted }
    }

    /// Moves the pointer to `id` if the store has such a session.
    pub fn switch_to(&self, id: &str) -> Result<()> {
        if !self.sessions.contains(id) {
            return Err(ChatkeepError::SessionNotFound(id.to_string()));
        }

        self.current.set(id);
        tracing::info!(session_id = %id, "switched session");
        Ok(())
    }

    pub fn current_session(&self) -> Result<ChatSession> {
        self.sessions.resolve(&self.current.get())
    }

    pub fn append_to_current(&self, message: Message) -> Result<PersistHandle> {
        self.sessions.append_message(&self.current.get(), message)
    }
}

impl fmt::Debug for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatState")
            .field("sessions", &self.sessions)
            .field("current", &self.current.get())
            .finish()
    }
}
