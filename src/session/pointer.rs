use super::model::DEFAULT_SESSION_ID;
use crate::reactive::{Observable, Subscription};

/// Reactive id of the session the UI is showing.
///
/// Never persisted: every process starts at the default session. The id is
/// not checked against any store.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    id: Observable<String>,
}

impl CurrentSession {
    pub fn new() -> Self {
        Self::starting_at(DEFAULT_SESSION_ID)
    }

    pub fn starting_at(id: impl Into<String>) -> Self {
        Self {
            id: Observable::new(id.into()),
        }
    }

    pub fn get(&self) -> String {
        self.id.get()
    }

    pub fn set(&self, id: impl Into<String>) {
        self.id.set(id.into());
    }

    pub fn subscribe(&self, callback: impl Fn(&String) + 'static) -> Subscription {
        self.id.subscribe(callback)
    }
}

impl Default for CurrentSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_starts_at_default() {
        assert_eq!(CurrentSession::new().get(), "default");
        assert_eq!(CurrentSession::default().get(), DEFAULT_SESSION_ID);
    }

    #[test]
    fn test_set_notifies_synchronously() {
        let current = CurrentSession::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let _sub = current.subscribe(move |id| sink.borrow_mut().push(id.clone()));
        current.set("abc");

        assert_eq!(*seen.borrow(), vec!["default", "abc"]);
        assert_eq!(current.get(), "abc");
    }

    #[test]
    fn test_accepts_unknown_ids() {
        let current = CurrentSession::starting_at("x");
        current.set("does-not-exist");
        assert_eq!(current.get(), "does-not-exist");
    }
}
