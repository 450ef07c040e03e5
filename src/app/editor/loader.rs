//! One-time, process-wide bootstrap of the widget library.
//!
//! The first `request` starts the fetch; later requests queue behind it. When
//! the fetch completes (`resolve`) every queued waiter is called, in the order
//! it asked, with the same outcome. Requests after completion are answered on
//! the spot without fetching again.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Outcome handed to waiters. Errors are plain messages so they can be shared.
pub type LoadResult<L> = std::result::Result<L, String>;

type Waiter<L> = Box<dyn FnOnce(LoadResult<L>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

enum Slot<L> {
    Idle,
    Loading { started: Instant },
    Loaded(L),
    Failed(String),
}

struct Inner<L> {
    slot: Slot<L>,
    waiters: Vec<Waiter<L>>,
    fetch: Rc<dyn Fn()>,
    fetches: u32,
    timeout: Option<Duration>,
}

/// Shared handle; clones refer to the same load.
pub struct SingleFlight<L> {
    inner: Rc<RefCell<Inner<L>>>,
}

impl<L> Clone for SingleFlight<L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<L: Clone + 'static> SingleFlight<L> {
    /// `fetch` starts the asynchronous load; whoever finishes it must call
    /// `resolve` on the UI thread.
    pub fn new(fetch: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                slot: Slot::Idle,
                waiters: Vec::new(),
                fetch: Rc::new(fetch),
                fetches: 0,
                timeout: None,
            })),
        }
    }

    /// A loader that is already complete.
    pub fn ready(library: L) -> Self {
        let loader = Self::new(|| {});
        loader.inner.borrow_mut().slot = Slot::Loaded(library);
        loader
    }

    /// Fail an in-flight load once it has run for longer than `timeout`
    /// (checked by `poll_timeout`).
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.inner.borrow_mut().timeout = Some(timeout);
        self
    }

    pub fn phase(&self) -> LoadPhase {
        match self.inner.borrow().slot {
            Slot::Idle => LoadPhase::Idle,
            Slot::Loading { .. } => LoadPhase::Loading,
            Slot::Loaded(_) => LoadPhase::Loaded,
            Slot::Failed(_) => LoadPhase::Failed,
        }
    }

    /// How many times the fetch has been started. Never more than one.
    pub fn fetch_count(&self) -> u32 {
        self.inner.borrow().fetches
    }

    pub fn request(&self, waiter: impl FnOnce(LoadResult<L>) + 'static) {
        let immediate = {
            let inner = self.inner.borrow();
            match &inner.slot {
                Slot::Loaded(library) => Some(Ok(library.clone())),
                Slot::Failed(message) => Some(Err(message.clone())),
                Slot::Idle | Slot::Loading { .. } => None,
            }
        };
        if let Some(result) = immediate {
            waiter(result);
            return;
        }

        let fetch = {
            let mut inner = self.inner.borrow_mut();
            inner.waiters.push(Box::new(waiter));
            if matches!(inner.slot, Slot::Idle) {
                inner.slot = Slot::Loading {
                    started: Instant::now(),
                };
                inner.fetches += 1;
                Some(inner.fetch.clone())
            } else {
                None
            }
        };

        if let Some(fetch) = fetch {
            tracing::debug!("starting widget library load");
            fetch();
        }
    }

    /// Complete the load. Ignored unless a load is in flight.
    pub fn resolve(&self, result: LoadResult<L>) {
        let waiters = {
            let mut inner = self.inner.borrow_mut();
            if !matches!(inner.slot, Slot::Loading { .. }) {
                tracing::debug!("ignoring widget library completion with no load in flight");
                return;
            }
            inner.slot = match &result {
                Ok(library) => Slot::Loaded(library.clone()),
                Err(message) => Slot::Failed(message.clone()),
            };
            mem::take(&mut inner.waiters)
        };

        match &result {
            Ok(_) => tracing::info!(waiters = waiters.len(), "widget library loaded"),
            Err(e) => tracing::error!(waiters = waiters.len(), error = %e, "widget library failed to load"),
        }

        for waiter in waiters {
            waiter(result.clone());
        }
    }

    /// Fail the load if it has been in flight past the deadline. Returns true
    /// when this call failed it.
    pub fn poll_timeout(&self, now: Instant) -> bool {
        let overdue = {
            let inner = self.inner.borrow();
            match (&inner.slot, inner.timeout) {
                (Slot::Loading { started }, Some(timeout)) => now.duration_since(*started) >= timeout,
                _ => false,
            }
        };
        if overdue {
            self.resolve(Err("widget library load timed out".to_string()));
        }
        overdue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_loader() -> (SingleFlight<u32>, Rc<Cell<u32>>) {
        let started = Rc::new(Cell::new(0));
        let s = started.clone();
        (SingleFlight::new(move || s.set(s.get() + 1)), started)
    }

    #[test]
    fn test_many_requests_fetch_once() {
        let (loader, started) = counting_loader();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let seen = seen.clone();
            loader.request(move |result| seen.borrow_mut().push((i, result)));
        }
        assert_eq!(started.get(), 1);
        assert_eq!(loader.phase(), LoadPhase::Loading);
        assert!(seen.borrow().is_empty());

        loader.resolve(Ok(42));
        assert_eq!(*seen.borrow(), vec![(0, Ok(42)), (1, Ok(42)), (2, Ok(42))]);

        // Already loaded: answered immediately, no refetch.
        let s = seen.clone();
        loader.request(move |result| s.borrow_mut().push((3, result)));
        assert_eq!(seen.borrow().last(), Some(&(3, Ok(42))));
        assert_eq!(started.get(), 1);
        assert_eq!(loader.fetch_count(), 1);
    }

    #[test]
    fn test_failure_reaches_every_waiter_and_sticks() {
        let (loader, started) = counting_loader();
        let failures = Rc::new(Cell::new(0));

        for _ in 0..2 {
            let f = failures.clone();
            loader.request(move |result| {
                assert!(result.is_err());
                f.set(f.get() + 1);
            });
        }
        loader.resolve(Err("script error".to_string()));
        assert_eq!(failures.get(), 2);
        assert_eq!(loader.phase(), LoadPhase::Failed);

        let f = failures.clone();
        loader.request(move |result| {
            assert_eq!(result, Err("script error".to_string()));
            f.set(f.get() + 1);
        });
        assert_eq!(failures.get(), 3);
        assert_eq!(started.get(), 1);
    }

    #[test]
    fn test_resolve_without_load_is_ignored() {
        let (loader, _) = counting_loader();
        loader.resolve(Ok(1));
        assert_eq!(loader.phase(), LoadPhase::Idle);
    }

    #[test]
    fn test_waiter_may_request_again() {
        let (loader, _) = counting_loader();
        let nested = Rc::new(Cell::new(None));

        let again = loader.clone();
        let n = nested.clone();
        loader.request(move |_| {
            let n = n.clone();
            again.request(move |result| n.set(result.ok()));
        });
        loader.resolve(Ok(7));
        assert_eq!(nested.get(), Some(7));
    }

    #[test]
    fn test_poll_timeout() {
        let (loader, _) = counting_loader();
        let loader = loader.with_timeout(Duration::from_secs(10));
        let outcome = Rc::new(RefCell::new(None));
        let o = outcome.clone();
        loader.request(move |result| *o.borrow_mut() = Some(result));

        let now = Instant::now();
        assert!(!loader.poll_timeout(now));
        assert!(loader.poll_timeout(now + Duration::from_secs(11)));
        assert_eq!(loader.phase(), LoadPhase::Failed);
        assert!(matches!(&*outcome.borrow(), Some(Err(msg)) if msg.contains("timed out")));

        // A completion that shows up afterwards is dropped.
        loader.resolve(Ok(1));
        assert_eq!(loader.phase(), LoadPhase::Failed);
    }

    #[test]
    fn test_ready_loader() {
        let loader = SingleFlight::ready(5u32);
        let got = Rc::new(Cell::new(0));
        let g = got.clone();
        loader.request(move |result| g.set(result.unwrap_or(0)));
        assert_eq!(got.get(), 5);
        assert_eq!(loader.fetch_count(), 0);
    }
}
