use crate::error::{ChatkeepError, Result};

/// Wraps any error convertible into [`ChatkeepError`] with a message that
/// names the file or key being handled.
pub trait ResultExt<T> {
    fn context(self, msg: impl Into<String>) -> Result<T>;
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ChatkeepError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.with_context(|| msg.into())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ChatkeepError::Context {
            message: f(),
            source: Box::new(e.into()),
        })
    }
}
