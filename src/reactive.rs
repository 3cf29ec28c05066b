use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    subscribers: Vec<(u64, Callback<T>)>,
    next_id: u64,
    /// Deliveries not yet made, in mutation order. Only the outermost
    /// `notify` drains it.
    pending: VecDeque<(u64, Rc<T>)>,
    notifying: bool,
}

/// A shared handle to a reactive value. Clones share the same value.
///
/// Every `set` or `update` calls each subscriber in subscription order before
/// returning. No borrow is held while a subscriber runs, so it may read the
/// cell, write it again, or drop any subscription. A write made from inside a
/// subscriber is delivered after the current round, so every subscriber sees
/// values in mutation order and the final value last.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                subscribers: Vec::new(),
                next_id: 0,
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Reads the current value without cloning it.
    ///
    /// The closure must not write to this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replaces the value and notifies every subscriber.
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().value = value;
        self.notify();
    }

    /// Applies `f` to the current value, stores the result and notifies.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let next = f(self.get());
        self.set(next);
    }

    /// Registers `callback`, calling it immediately with the current value.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(callback);
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Rc::clone(&callback)));
            id
        };

        let current = self.get();
        callback(&current);

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner
                        .borrow_mut()
                        .subscribers
                        .retain(|(sub_id, _)| *sub_id != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            let value = Rc::new(inner.value.clone());
            let ids: Vec<u64> = inner.subscribers.iter().map(|(id, _)| *id).collect();
            inner
                .pending
                .extend(ids.into_iter().map(|id| (id, Rc::clone(&value))));
            if inner.notifying {
                return;
            }
            inner.notifying = true;
        }

        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let Some((id, value)) = inner.pending.pop_front() else {
                    inner.notifying = false;
                    break;
                };
                // Skip subscribers dropped since the delivery was queued.
                let callback = inner
                    .subscribers
                    .iter()
                    .find(|(sub_id, _)| *sub_id == id)
                    .map(|(_, callback)| Rc::clone(callback));
                callback.map(|callback| (callback, value))
            };

            if let Some((callback, value)) = next {
                callback(&value);
            }
        }
    }
}

/// Keeps a subscriber registered until dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Leaves the subscriber registered for the lifetime of the observable.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscribe_fires_immediately() {
        let cell = Observable::new(7);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let _sub = cell.subscribe(move |v| sink.borrow_mut().push(*v));

        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn test_set_notifies_in_order() {
        let cell = Observable::new(String::from("a"));
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        let _a = cell.subscribe(move |v| first.borrow_mut().push(format!("first:{}", v)));
        let second = Rc::clone(&log);
        let _b = cell.subscribe(move |v| second.borrow_mut().push(format!("second:{}", v)));

        log.borrow_mut().clear();
        cell.set("b".to_string());

        assert_eq!(*log.borrow(), vec!["first:b", "second:b"]);
        assert_eq!(cell.get(), "b");
    }

    #[test]
    fn test_identity_update_still_notifies() {
        let cell = Observable::new(vec![1, 2, 3]);
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let _sub = cell.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(calls.get(), 1);

        cell.update(|v| v);

        assert_eq!(calls.get(), 2);
        assert_eq!(cell.get(), vec![1, 2, 3]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let cell = Observable::new(0);
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let sub = cell.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(cell.subscriber_count(), 1);

        drop(sub);
        cell.set(1);

        assert_eq!(cell.subscriber_count(), 0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_detach_keeps_subscriber() {
        let cell = Observable::new(0);
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        cell.subscribe(move |_| counter.set(counter.get() + 1))
            .detach();
        cell.set(5);

        assert_eq!(cell.subscriber_count(), 1);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_subscriber_can_read_and_write() {
        let cell = Observable::new(0);
        let handle = cell.clone();
        let _sub = cell.subscribe(move |v| {
            if *v == 1 {
                handle.set(handle.get() + 1);
            }
        });

        cell.set(1);

        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn test_nested_set_delivered_in_order() {
        let cell = Observable::new(0);
        let handle = cell.clone();
        let _bump = cell.subscribe(move |v| {
            if *v == 1 {
                handle.set(2);
            }
        });

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _record = cell.subscribe(move |v| sink.borrow_mut().push(*v));

        cell.set(1);

        assert_eq!(cell.get(), 2);
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_nested_update_seen_last_by_every_subscriber() {
        let cell = Observable::new(vec!["a".to_string()]);
        let handle = cell.clone();
        let _append = cell.subscribe(move |v| {
            if v.len() == 2 {
                handle.update(|mut v| {
                    v.push("c".to_string());
                    v
                });
            }
        });

        let last = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&last);
        let _watch = cell.subscribe(move |v: &Vec<String>| *sink.borrow_mut() = v.clone());

        cell.update(|mut v| {
            v.push("b".to_string());
            v
        });

        assert_eq!(cell.get(), vec!["a", "b", "c"]);
        assert_eq!(*last.borrow(), cell.get());
    }

    #[test]
    fn test_subscriber_dropped_mid_round_not_called() {
        let cell = Observable::new(0);
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let victim = Rc::clone(&slot);
        let _dropper = cell.subscribe(move |v| {
            if *v == 1 {
                let sub = victim.borrow_mut().take();
                drop(sub);
            }
        });

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        *slot.borrow_mut() = Some(cell.subscribe(move |_| counter.set(counter.get() + 1)));
        assert_eq!(calls.get(), 1);

        cell.set(1);
        cell.set(2);

        assert_eq!(calls.get(), 1);
        assert_eq!(cell.subscriber_count(), 1);
    }

    #[test]
    fn test_clones_share_value() {
        let cell = Observable::new(1);
        let other = cell.clone();

        other.set(42);

        assert_eq!(cell.get(), 42);
        assert_eq!(cell.with(|v| v * 2), 84);
    }

    #[test]
    fn test_subscription_outlives_observable() {
        let cell = Observable::new(0);
        let sub = cell.subscribe(|_| {});
        drop(cell);
        sub.unsubscribe();
    }
}
