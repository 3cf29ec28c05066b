//! Persisted, reactive chat session state.
//!
//! The crate keeps a mapping of chat sessions and a pointer to the session a
//! UI is showing. Both are observable: subscribers run synchronously on every
//! change. The session mapping is mirrored to a key-value [`storage`] backend
//! after every update, without making the caller wait for the write.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chatkeep::session::{ChatState, Message};
//! use chatkeep::storage::MemoryStorage;
//!
//! let state = ChatState::open(Arc::new(MemoryStorage::new()));
//! assert_eq!(state.current().get(), "default");
//!
//! let chat = state.new_chat();
//! state.append_to_current(Message::user("Hello!")).unwrap();
//!
//! let current = state.current_session().unwrap();
//! assert_eq!(current.id, chat.id);
//! assert_eq!(current.messages.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod error_ext;
pub mod persist;
pub mod reactive;
pub mod session;
pub mod storage;

pub use error::{ChatkeepError, Result};
pub use persist::PersistHandle;
