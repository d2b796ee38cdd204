//! Subscriber registry and unsubscribe handles.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use trolley_commerce::CartSnapshot;

type Listener = Arc<dyn Fn(Arc<CartSnapshot>) + Send + Sync>;

/// Listeners invoked with every committed snapshot, in registration order.
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    inner: Mutex<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl SubscriberRegistry {
    pub(crate) fn new() -> Arc<Self> {
        Arc::default()
    }

    pub(crate) fn add(registry: &Arc<Self>, listener: Listener) -> Subscription {
        let mut inner = registry
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, listener));
        Subscription {
            id,
            registry: Arc::downgrade(registry),
        }
    }

    fn remove(&self, id: u64) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .retain(|(listener_id, _)| *listener_id != id);
    }

    /// Invoke all listeners with the snapshot.
    ///
    /// Listeners run outside the registry lock so one may subscribe or
    /// unsubscribe others without deadlocking.
    pub(crate) fn notify(&self, snapshot: &Arc<CartSnapshot>) {
        let listeners: Vec<Listener> = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(Arc::clone(snapshot));
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }
}

/// Handle for one registered listener.
///
/// The listener stays registered for the lifetime of the handle; dropping it
/// (or calling [`unsubscribe`](Subscription::unsubscribe)) deregisters.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<SubscriberRegistry>,
}

impl Subscription {
    /// Deregister the listener now.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}
