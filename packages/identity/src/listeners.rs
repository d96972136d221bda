//! # Session-change listeners
//!
//! Identity providers push session changes to interested parties instead of
//! being polled. [`Listeners`] is the registry a provider keeps for that: each
//! call to [`Listeners::add`] returns a [`Subscription`], and dropping the
//! subscription removes the listener again.
//!
//! Everything here is single-threaded (`Rc` + `RefCell`), matching the UI event
//! loop the providers run on. Listeners are invoked outside the registry borrow,
//! so a listener may add or drop subscriptions while being notified.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::status::Identity;

/// Callback invoked with the provider's current user, or `None` when signed out.
pub type Listener = Rc<dyn Fn(Option<Identity>)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Registry of session-change listeners owned by an identity provider.
#[derive(Clone, Default)]
pub struct Listeners {
    inner: Rc<RefCell<Registry>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn add(&self, listener: Listener) -> Subscription {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, listener));
        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `user` to every registered listener, in registration order.
    pub fn notify(&self, user: Option<&Identity>) {
        let snapshot: Vec<Listener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(user.cloned());
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Unsubscribe now. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
