//! Observable value holders for UI state.
//!
//! # Design
//! A `Writable<T>` owns the current value and an ordered list of subscriber
//! callbacks. `set` replaces the value and calls every subscriber, in
//! registration order, before returning. `subscribe` calls the new
//! subscriber once with the current value straight away.
//!
//! Stores are single-threaded (`Rc` + `RefCell`). No borrow is held while
//! subscribers run, so a callback may itself `set`, `subscribe` or
//! unsubscribe on the same store.
//!
//! A `set` made from inside a callback does not notify straight away. Its
//! `(callback, value)` pairs join a queue that the outermost `set` drains
//! front to back, so every subscriber sees writes in the order they were
//! made and ends on the value the store holds.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
    pending: VecDeque<(Callback<T>, T)>,
    notifying: bool,
}

/// Clears the notifying flag once the outermost `set` is done, including
/// when a callback panics.
struct Draining<'a, T>(&'a RefCell<Inner<T>>);

impl<T> Drop for Draining<'_, T> {
    fn drop(&mut self) {
        let mut inner = self.0.borrow_mut();
        inner.notifying = false;
        inner.pending.clear();
    }
}

/// A readable, replaceable and subscribable value.
///
/// Cloning a `Writable` yields another handle to the same slot.
pub struct Writable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T: Clone + 'static> Writable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                next_id: 0,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replaces the value and notifies every subscriber with it.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            let queued: Vec<(Callback<T>, T)> = inner
                .subscribers
                .iter()
                .map(|(_, cb)| (Rc::clone(cb), value.clone()))
                .collect();
            inner.pending.extend(queued);
            inner.value = value;
            if inner.notifying {
                return;
            }
            inner.notifying = true;
        }

        let _draining = Draining(&self.inner);
        loop {
            let next = self.inner.borrow_mut().pending.pop_front();
            let Some((callback, value)) = next else {
                break;
            };
            callback(&value);
        }
    }

    /// Replaces the value with `f(current)`.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        self.set(f(self.get()));
    }

    /// Registers `callback` and runs it once with the current value.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(callback);
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Rc::clone(&callback)));
            (id, inner.value.clone())
        };
        callback(&current);

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: Clone + Default + 'static> Default for Writable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Writable")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Handle returned by [`Writable::subscribe`].
///
/// Dropping the handle keeps the callback registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}
