//! Shared value with change notifications.
//!
//! The tour runs on a single UI/event thread, so the shared state lives in an
//! `Rc<RefCell<..>>` rather than behind a lock. Listeners are invoked after the
//! new value is committed and after the internal borrow is released: a listener
//! may read the store, set it again, or drop its own subscription.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Stores `value` and notifies every listener. Returns `false` without
    /// notifying anyone when `value` equals the held one. If a listener sets
    /// the store again, the remaining listeners only see the newer value.
    pub fn set(&self, value: T) -> bool {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value.clone();
            inner
                .listeners
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect::<Vec<_>>()
        };

        for listener in listeners {
            // A listener set the store again; that nested set has already
            // delivered the newer value to everyone.
            if self.inner.borrow().value != value {
                break;
            }
            listener(&value);
        }
        true
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Rc::new(listener)));
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                // The listener is dropped outside the borrow: it may own
                // another subscription to this very store.
                let removed = {
                    let mut inner = inner.borrow_mut();
                    inner
                        .listeners
                        .iter()
                        .position(|(listener_id, _)| *listener_id == id)
                        .map(|position| inner.listeners.remove(position))
                };
                drop(removed);
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Handle returned by [`Observable::subscribe`]. The listener stays attached
/// while the handle is alive.
#[must_use = "dropping a Subscription unsubscribes the listener immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Keeps the listener attached for as long as the store lives.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_notifies_with_new_value() {
        let store = Observable::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = store.subscribe(move |v: &i32| sink.borrow_mut().push(*v));

        assert!(store.set(2));
        assert!(store.set(3));
        assert_eq!(*seen.borrow(), vec![2, 3]);
        assert_eq!(store.get(), 3);
    }

    #[test]
    fn setting_same_value_is_silent() {
        let store = Observable::new("en".to_string());
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let _sub = store.subscribe(move |_: &String| counter.set(counter.get() + 1));

        assert!(!store.set("en".to_string()));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn dropping_subscription_detaches_listener() {
        let store = Observable::new(false);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let sub = store.subscribe(move |_: &bool| counter.set(counter.get() + 1));
        assert_eq!(store.subscriber_count(), 1);

        sub.unsubscribe();
        store.set(true);
        assert_eq!(calls.get(), 0);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn detached_subscription_keeps_listening() {
        let store = Observable::new(0u8);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        store
            .subscribe(move |_: &u8| counter.set(counter.get() + 1))
            .detach();

        store.set(1);
        store.set(2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn listener_can_read_and_set_store() {
        let store = Observable::new(0);
        let inner = store.clone();
        let _sub = store.subscribe(move |v: &i32| {
            // Clamp anything above ten back down.
            if *v > 10 {
                inner.set(10);
            }
            assert!(inner.get() <= *v);
        });

        store.set(42);
        assert_eq!(store.get(), 10);
    }

    #[test]
    fn later_listeners_never_end_on_stale_value() {
        let store = Observable::new(0);
        let clamp = store.clone();
        let _clamp_sub = store.subscribe(move |v: &i32| {
            if *v > 10 {
                clamp.set(10);
            }
        });
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _record_sub = store.subscribe(move |v: &i32| sink.borrow_mut().push(*v));

        store.set(42);
        assert_eq!(store.get(), 10);
        assert_eq!(*seen.borrow(), vec![10]);
    }

    #[test]
    fn subscription_outliving_store_is_harmless() {
        let store = Observable::new(0);
        let sub = store.subscribe(|_: &i32| {});
        drop(store);
        sub.unsubscribe();
    }
}
