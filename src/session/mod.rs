pub mod model;
mod pointer;
mod state;
mod store;

pub use model::{
    seed_sessions, summarize, ChatSession, Message, Role, SessionSummary, Sessions,
    DEFAULT_SESSION_ID, NEW_SESSION_TITLE,
};
pub use pointer::CurrentSession;
pub use state::{ChatState, IdGenerator, NewChat, UuidGenerator};
pub use store::{SessionStore, SESSIONS_STORAGE_KEY};
