//! Change-listener registry and subscription lifecycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::jar::store::CookieJar;

/// Identifies one registered change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) type Callback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Registry of zero-argument callbacks invoked after every jar mutation.
#[derive(Default)]
pub(crate) struct ChangeListeners {
    entries: Mutex<Vec<(ListenerId, Callback)>>,
    next_id: AtomicU64,
}

impl ChangeListeners {
    pub(crate) fn add(&self, callback: Callback) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, callback));
        id
    }

    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Invoke every listener in registration order. The registry lock is
    /// released before the first call, so a callback may read the jar or
    /// change the registry without deadlocking.
    pub(crate) fn notify(&self) {
        let callbacks: Vec<Callback> = self.lock().iter().map(|(_, cb)| Arc::clone(cb)).collect();
        tracing::trace!(listeners = callbacks.len(), "notifying cookie change listeners");
        for callback in callbacks {
            callback();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(ListenerId, Callback)>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// RAII change-listener registration.
///
/// Deregisters when dropped, so a listener attached through
/// [`CookieJar::subscribe`] can never leak or double-remove, whichever
/// way its owner is torn down.
#[must_use = "dropping a Subscription immediately deregisters the listener"]
pub struct Subscription {
    jar: CookieJar,
    id: ListenerId,
}

impl Subscription {
    pub(crate) fn new(jar: CookieJar, id: ListenerId) -> Self {
        Self { jar, id }
    }

    /// The registry id of the underlying listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.jar.remove_change_listener(self.id);
    }
}
