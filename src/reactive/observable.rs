//! Single-threaded observable values with synchronous change notification

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct Shared<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<Callback<T>>>,
}

/// A shared, version-tracked value that notifies subscribers on change
///
/// Cloning the handle shares the same underlying value.
pub struct Observable<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable holding `value`
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T {
        self.shared.borrow().value.clone()
    }

    /// Borrow the current value without cloning it
    ///
    /// The closure must not write to this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.borrow().value)
    }

    /// Number of value-changing writes so far
    pub fn version(&self) -> u64 {
        self.shared.borrow().version
    }

    /// Replace the value and notify subscribers
    ///
    /// Writing a value equal to the current one is a no-op. Every subscriber
    /// has run by the time this returns.
    pub fn set(&self, value: T) {
        {
            let mut shared = self.shared.borrow_mut();
            if shared.value == value {
                return;
            }
            shared.value = value;
            shared.version += 1;
        }
        self.notify();
    }

    /// Mutate the value in place, notifying only if it actually changed
    ///
    /// The closure must not touch this observable.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut shared = self.shared.borrow_mut();
            let before = shared.value.clone();
            f(&mut shared.value);
            if shared.value == before {
                false
            } else {
                shared.version += 1;
                true
            }
        };
        if changed {
            self.notify();
        }
    }

    /// Register a callback invoked with the new value after every change
    ///
    /// The callback stays registered for as long as the returned
    /// [`Subscription`] is alive.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        self.shared
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&callback));
        Subscription {
            _callback: Box::new(callback),
        }
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.shared
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    fn notify(&self) {
        // No borrow may be held while callbacks run: they are free to read
        // and write this observable again.
        let (value, callbacks) = {
            let mut shared = self.shared.borrow_mut();
            shared.subscribers.retain(|w| w.strong_count() > 0);
            let callbacks: Vec<Rc<Callback<T>>> = shared
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect();
            (shared.value.clone(), callbacks)
        };
        for callback in callbacks {
            callback(&value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("Observable")
            .field("value", &shared.value)
            .field("version", &shared.version)
            .finish()
    }
}

/// RAII guard for a registered callback
///
/// Dropping it unsubscribes the callback before the next notification.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
