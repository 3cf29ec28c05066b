use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatkeepError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Background write failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<ChatkeepError>,
    },
}

impl ChatkeepError {
    /// Short, user-facing suggestion for recovering from this error.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ChatkeepError::SessionNotFound(_) => {
                Some("Use /list to see the available sessions")
            }
            ChatkeepError::Config(_) | ChatkeepError::Toml(_) => {
                Some("Check .chatkeep/config.toml in your workspace")
            }
            ChatkeepError::Json(_) => Some("The stored sessions may be corrupt"),
            ChatkeepError::Context { source, .. } => source.hint(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatkeepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_forwards_hint() {
        let err = ChatkeepError::Context {
            message: "Failed to resolve current session".to_string(),
            source: Box::new(ChatkeepError::SessionNotFound("abc".to_string())),
        };

        assert_eq!(err.hint(), Some("Use /list to see the available sessions"));
        assert_eq!(
            err.to_string(),
            "Failed to resolve current session: Session not found: abc"
        );
    }

    #[test]
    fn test_storage_has_no_hint() {
        let err = ChatkeepError::Storage("disk full".to_string());
        assert!(err.hint().is_none());
    }
}
