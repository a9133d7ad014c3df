//! Handle registry — the one place a control surface finds the running service.
//!
//! The registry holds at most one published handle. Observers registered
//! through [`HandleRegistry::register_observer`] are called synchronously
//! with the current value on registration and again on every change. Async
//! consumers can instead [`subscribe`](HandleRegistry::subscribe) to a
//! tokio [`watch`] channel carrying the same values.
//!
//! Observers run after the registry's lock is released, so they may read the
//! registry. They must not drive lifecycle transitions on the published
//! service from inside the callback.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use axpulse_domain::id::ObserverId;

type Observer<T> = Arc<dyn Fn(Option<Arc<T>>) + Send + Sync>;

struct Inner<T: ?Sized> {
    current: Option<Arc<T>>,
    observers: Vec<(ObserverId, Observer<T>)>,
}

/// Single-slot registry with synchronous change observers.
pub struct HandleRegistry<T: ?Sized> {
    inner: Mutex<Inner<T>>,
    sender: watch::Sender<Option<Arc<T>>>,
}

impl<T: ?Sized> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                current: None,
                observers: Vec::new(),
            }),
            sender: watch::Sender::new(None),
        }
    }
}

impl<T: ?Sized> HandleRegistry<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently published handle, if any.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        self.lock().current.clone()
    }

    /// Publish `handle`, replacing whatever was there.
    pub fn publish(&self, handle: Arc<T>) {
        let observers = {
            let mut inner = self.lock();
            inner.current = Some(Arc::clone(&handle));
            Self::snapshot(&inner)
        };
        self.notify(&observers, Some(handle));
    }

    /// Clear the slot unconditionally.
    pub fn clear(&self) {
        let observers = {
            let mut inner = self.lock();
            inner.current = None;
            Self::snapshot(&inner)
        };
        self.notify(&observers, None);
    }

    /// Clear the slot only if it currently holds `target`.
    ///
    /// Returns `true` when the slot was cleared. Identity is by address.
    pub fn retract(&self, target: &T) -> bool {
        let observers = {
            let mut inner = self.lock();
            let target: *const T = target;
            let holds_target = inner
                .current
                .as_ref()
                .is_some_and(|current| std::ptr::addr_eq(Arc::as_ptr(current), target));
            if !holds_target {
                return false;
            }
            inner.current = None;
            Self::snapshot(&inner)
        };
        self.notify(&observers, None);
        true
    }

    /// Register `callback`. It is invoked immediately with the current value,
    /// then on every publish or clear until unregistered.
    pub fn register_observer<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(Option<Arc<T>>) + Send + Sync + 'static,
    {
        let id = ObserverId::new();
        let observer: Observer<T> = Arc::new(callback);
        let current = {
            let mut inner = self.lock();
            inner.observers.push((id, Arc::clone(&observer)));
            inner.current.clone()
        };
        observer(current);
        id
    }

    /// Remove a previously registered observer. Returns `false` if unknown.
    pub fn unregister_observer(&self, id: ObserverId) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(oid, _)| *oid != id);
        inner.observers.len() != before
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    /// Subscribe to changes through a watch channel.
    ///
    /// The receiver starts out holding the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<T>>> {
        self.sender.subscribe()
    }

    fn snapshot(inner: &Inner<T>) -> Vec<Observer<T>> {
        inner.observers.iter().map(|(_, o)| Arc::clone(o)).collect()
    }

    fn notify(&self, observers: &[Observer<T>], value: Option<Arc<T>>) {
        // send_replace never fails, even with no receivers.
        self.sender.send_replace(value.clone());
        for observer in observers {
            observer(value.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
