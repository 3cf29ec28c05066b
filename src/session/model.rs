use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier of the session that exists before anything else is created.
pub const DEFAULT_SESSION_ID: &str = "default";
/// Title given to every freshly created session.
pub const NEW_SESSION_TITLE: &str = "New conversation";

const EMPTY_PREVIEW: &str = "Empty session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::System => "system",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    /// Messages in append order
    pub messages: Vec<Message>,
}

impl ChatSession {
    /// Creates an empty session carrying the placeholder title.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: NEW_SESSION_TITLE.to_string(),
            messages: Vec::new(),
        }
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// First non-empty user message, truncated to `max_chars` characters.
    pub fn preview(&self, max_chars: usize) -> String {
        for message in &self.messages {
            if message.role != Role::User {
                continue;
            }

            let text = message.content.trim();
            if text.is_empty() {
                continue;
            }

            return if text.chars().count() > max_chars {
                let truncated: String = text.chars().take(max_chars).collect();
                format!("{}...", truncated)
            } else {
                text.to_string()
            };
        }
        EMPTY_PREVIEW.to_string()
    }

    pub fn summary(&self, max_preview_chars: usize) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            preview: self.preview(max_preview_chars),
            message_count: self.message_count(),
        }
    }
}

/// Sessions keyed by id. Key order carries no meaning.
pub type Sessions = HashMap<String, ChatSession>;

/// The mapping a store starts from when nothing has been persisted yet.
pub fn seed_sessions() -> Sessions {
    let mut sessions = Sessions::new();
    sessions.insert(
        DEFAULT_SESSION_ID.to_string(),
        ChatSession::new(DEFAULT_SESSION_ID),
    );
    sessions
}

/// Listing row for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub message_count: usize,
}

/// Summaries of every session, default session first, the rest by title then id.
pub fn summarize(sessions: &Sessions, max_preview_chars: usize) -> Vec<SessionSummary> {
    let mut summaries: Vec<SessionSummary> = sessions
        .values()
        .map(|session| session.summary(max_preview_chars))
        .collect();

    summaries.sort_by(|a, b| {
        (a.id != DEFAULT_SESSION_ID, &a.title, &a.id).cmp(&(
            b.id != DEFAULT_SESSION_ID,
            &b.title,
            &b.id,
        ))
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seed_contains_only_default() {
        let sessions = seed_sessions();
        assert_eq!(sessions.len(), 1);

        let default = &sessions[DEFAULT_SESSION_ID];
        assert_eq!(default.id, "default");
        assert_eq!(default.title, "New conversation");
        assert!(default.messages.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut session = ChatSession::new("abc");
        session.messages.push(Message::user("Hello"));
        session.messages.push(Message::assistant("Hi"));

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "abc",
                "title": "New conversation",
                "messages": [
                    {"role": "user", "content": "Hello"},
                    {"role": "assistant", "content": "Hi"}
                ]
            })
        );
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result: Result<Message, _> =
            serde_json::from_str(r#"{"role": "tool", "content": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_preview_extraction() {
        let mut session = ChatSession::new("p");
        assert_eq!(session.preview(120), "Empty session");

        session.messages.push(Message::system("be brief"));
        session.messages.push(Message::user("   "));
        session.messages.push(Message::user("  What is Rust?  "));
        assert_eq!(session.preview(120), "What is Rust?");

        let long = "é".repeat(150);
        let session = ChatSession {
            messages: vec![Message::user(long)],
            ..ChatSession::new("q")
        };
        let preview = session.preview(120);
        assert_eq!(preview.chars().count(), 123);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_summarize_puts_default_first() {
        let mut sessions = seed_sessions();
        let mut named = ChatSession::new("zzz");
        named.title = "A title".to_string();
        sessions.insert(named.id.clone(), named);
        sessions.insert("aaa".to_string(), ChatSession::new("aaa"));

        let ids: Vec<String> = summarize(&sessions, 10)
            .into_iter()
            .map(|summary| summary.id)
            .collect();
        assert_eq!(ids, vec!["default", "zzz", "aaa"]);
    }
}
