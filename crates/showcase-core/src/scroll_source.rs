#![forbid(unsafe_code)]

//! Scroll event source and scoped listener subscriptions.
//!
//! The source stands in for the host viewport's scroll event stream. Every
//! call to [`ScrollEventSource::dispatch`] notifies the registered listeners
//! in registration order. Registration returns a [`Subscription`] guard that
//! deregisters the listener when dropped, so a listener cannot outlive the
//! component that owns the guard.
//!
//! # Invariants
//!
//! 1. Each subscription is removed from the registry exactly once (on
//!    [`Subscription::cancel`] or drop, whichever comes first).
//! 2. A listener removed during a dispatch is not invoked later in that same
//!    dispatch.
//! 3. Guards hold only a weak handle to the registry, so dropping the source
//!    first is harmless.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Identifier of a registered listener.
pub type ListenerId = u64;

/// Receives scroll notifications.
///
/// Events carry no payload. Listeners query current geometry themselves.
pub trait ScrollListener {
    /// Called once per dispatched scroll event.
    fn on_scroll(&mut self);
}

/// Shared handle to a listener.
pub type ListenerHandle = Rc<RefCell<dyn ScrollListener>>;

#[derive(Default)]
struct Registry {
    next_id: ListenerId,
    listeners: Vec<(ListenerId, ListenerHandle)>,
}

impl Registry {
    fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(lid, _)| *lid == id)
    }

    fn remove(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }
}

/// Dispatcher for scroll events.
#[derive(Default)]
pub struct ScrollEventSource {
    registry: Rc<RefCell<Registry>>,
    dispatched: Cell<u64>,
}

impl fmt::Debug for ScrollEventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollEventSource")
            .field("listeners", &self.listener_count())
            .field("dispatched", &self.dispatched.get())
            .finish()
    }
}

impl ScrollEventSource {
    /// Create a source with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the returned guard is
    /// cancelled or dropped.
    #[must_use = "dropping the subscription immediately deregisters the listener"]
    pub fn subscribe(&self, listener: ListenerHandle) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, listener));
        crate::trace!(
            listener_id = id,
            listeners = registry.listeners.len(),
            "scroll listener registered"
        );
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
            released: false,
        }
    }

    /// Deliver one scroll event to every registered listener.
    ///
    /// Returns the number of listeners that ran. A listener that is already
    /// borrowed (re-entrant dispatch from inside a handler) is skipped.
    pub fn dispatch(&self) -> usize {
        self.dispatched.set(self.dispatched.get() + 1);
        let snapshot: Vec<(ListenerId, ListenerHandle)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();

        let mut delivered = 0;
        for (id, listener) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut l) => {
                    l.on_scroll();
                    delivered += 1;
                }
                Err(_) => {
                    crate::warn!(listener_id = id, "re-entrant scroll dispatch skipped");
                }
            }
        }
        delivered
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Total events dispatched since creation.
    pub fn dispatched(&self) -> u64 {
        self.dispatched.get()
    }
}

/// Scoped registration of a [`ScrollListener`].
///
/// Deregisters on drop.
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
    released: bool,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    /// Listener id assigned at registration.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered with a live source.
    pub fn is_active(&self) -> bool {
        !self.released
            && self
                .registry
                .upgrade()
                .is_some_and(|r| r.borrow().contains(self.id))
    }

    /// Deregister now.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(self.id);
            crate::trace!(listener_id = self.id, "scroll listener released");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        hits: Rc<Cell<u32>>,
    }

    impl ScrollListener for Counter {
        fn on_scroll(&mut self) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    fn counter() -> (ListenerHandle, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        let listener: ListenerHandle = Rc::new(RefCell::new(Counter {
            hits: Rc::clone(&hits),
        }));
        (listener, hits)
    }

    #[test]
    fn dispatch_reaches_registered_listeners() {
        let source = ScrollEventSource::new();
        let (a, a_hits) = counter();
        let (b, b_hits) = counter();
        let _sa = source.subscribe(a);
        let _sb = source.subscribe(b);

        assert_eq!(source.dispatch(), 2);
        assert_eq!(source.dispatch(), 2);
        assert_eq!(a_hits.get(), 2);
        assert_eq!(b_hits.get(), 2);
        assert_eq!(source.dispatched(), 2);
    }

    #[test]
    fn drop_deregisters() {
        let source = ScrollEventSource::new();
        let (a, hits) = counter();
        let sub = source.subscribe(a);
        assert_eq!(source.listener_count(), 1);
        drop(sub);
        assert_eq!(source.listener_count(), 0);
        assert_eq!(source.dispatch(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn cancel_deregisters_once() {
        let source = ScrollEventSource::new();
        let (a, _) = counter();
        let (b, _) = counter();
        let sa = source.subscribe(a);
        let sb = source.subscribe(b);
        assert!(sa.is_active());
        sa.cancel();
        assert_eq!(source.listener_count(), 1);
        assert!(sb.is_active());
    }

    #[test]
    fn ids_are_unique() {
        let source = ScrollEventSource::new();
        let (a, _) = counter();
        let (b, _) = counter();
        let sa = source.subscribe(a);
        let sb = source.subscribe(b);
        assert_ne!(sa.id(), sb.id());
    }

    #[test]
    fn guard_outliving_source_is_harmless() {
        let source = ScrollEventSource::new();
        let (a, _) = counter();
        let sub = source.subscribe(a);
        drop(source);
        assert!(!sub.is_active());
        drop(sub);
    }

    struct Unsubscriber {
        victim: Rc<RefCell<Option<Subscription>>>,
    }

    impl ScrollListener for Unsubscriber {
        fn on_scroll(&mut self) {
            self.victim.borrow_mut().take();
        }
    }

    #[test]
    fn listener_removed_mid_dispatch_is_not_invoked() {
        let source = ScrollEventSource::new();
        let victim_slot = Rc::new(RefCell::new(None));
        let killer: ListenerHandle = Rc::new(RefCell::new(Unsubscriber {
            victim: Rc::clone(&victim_slot),
        }));
        let _killer_sub = source.subscribe(killer);

        let (victim, victim_hits) = counter();
        *victim_slot.borrow_mut() = Some(source.subscribe(victim));

        assert_eq!(source.dispatch(), 1);
        assert_eq!(victim_hits.get(), 0);
        assert_eq!(source.listener_count(), 1);
    }
}
