//! Minimal observer primitives shared by the theme store and the editor adapter.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`): state lives on the UI
//! thread and listeners run synchronously inside `emit`.

use std::cell::RefCell;
use std::rc::Rc;

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Registry<T: ?Sized> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// A list of callbacks that can be notified with a borrowed value.
///
/// Cloning yields another handle to the same list.
pub struct Subscribers<T: ?Sized> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: ?Sized + 'static> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 1,
                entries: Vec::new(),
            })),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let listener: Listener<T> = Rc::new(RefCell::new(callback));
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, listener));
            id
        };

        let weak = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Notify every listener registered at the time of the call, in
    /// registration order. A listener that is already running further up the
    /// stack is skipped instead of re-entered.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in snapshot {
            match listener.try_borrow_mut() {
                Ok(mut callback) => callback(value),
                Err(_) => tracing::debug!("skipping re-entrant listener"),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every listener. Outstanding `Subscription`s become inert.
    pub fn clear(&self) {
        self.registry.borrow_mut().entries.clear();
    }
}

impl<T: ?Sized + 'static> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Subscribers<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

/// Handle returned by `subscribe`. Dropping it detaches the listener.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}

/// A value cell with change notification: `get`, `set`, `subscribe`.
///
/// Every `set` notifies, even when the new value equals the old one.
pub struct Observable<T> {
    value: RefCell<T>,
    subscribers: Subscribers<T>,
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: Subscribers::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value.clone();
        self.subscribers.emit(&value);
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        self.subscribers.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_all_listeners_in_order() {
        let subscribers: Subscribers<u32> = Subscribers::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = seen.clone();
        let _first = subscribers.subscribe(move |v| a.borrow_mut().push(("first", *v)));
        let b = seen.clone();
        let _second = subscribers.subscribe(move |v| b.borrow_mut().push(("second", *v)));

        subscribers.emit(&7);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_dropping_subscription_detaches() {
        let subscribers: Subscribers<u32> = Subscribers::new();
        let count = Rc::new(Cell::new(0));

        let c = count.clone();
        let sub = subscribers.subscribe(move |_| c.set(c.get() + 1));
        subscribers.emit(&1);
        drop(sub);
        subscribers.emit(&2);

        assert_eq!(count.get(), 1);
        assert!(subscribers.is_empty());
    }

    #[test]
    fn test_unsubscribe_after_registry_dropped_is_harmless() {
        let subscribers: Subscribers<str> = Subscribers::new();
        let sub = subscribers.subscribe(|_| {});
        drop(subscribers);
        sub.unsubscribe();
    }

    #[test]
    fn test_listener_may_subscribe_during_emit() {
        let subscribers: Subscribers<u32> = Subscribers::new();
        let late = Rc::new(RefCell::new(Vec::new()));

        let handle = subscribers.clone();
        let late_subs = late.clone();
        let _sub = subscribers.subscribe(move |_| {
            late_subs.borrow_mut().push(handle.subscribe(|_| {}));
        });

        subscribers.emit(&1);
        assert_eq!(subscribers.len(), 2);
    }

    #[test]
    fn test_observable_set_notifies_every_time() {
        let mode = Observable::new("dark");
        let calls = Rc::new(RefCell::new(Vec::new()));

        let c = calls.clone();
        let _sub = mode.subscribe(move |v| c.borrow_mut().push(*v));

        mode.set("light");
        mode.set("light");
        mode.set("dark");

        assert_eq!(mode.get(), "dark");
        assert_eq!(*calls.borrow(), vec!["light", "light", "dark"]);
    }

    #[test]
    fn test_observable_reads_inside_listener() {
        let counter = Rc::new(Observable::new(0u32));
        let observed = Rc::new(Cell::new(0));

        let inner = counter.clone();
        let o = observed.clone();
        let _sub = counter.subscribe(move |_| o.set(inner.get()));

        counter.set(5);
        assert_eq!(observed.get(), 5);
    }
}
