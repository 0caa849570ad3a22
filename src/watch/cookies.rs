//! Whole-map cookie watcher.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::base::options::{GetOptions, SetOptions};
use crate::jar::listener::Subscription;
use crate::jar::store::{CookieJar, CookieMap};

/// A live view of every cookie in one jar.
///
/// The watcher keeps a snapshot of the full map and resynchronizes it
/// whenever the jar notifies a mutation, whether it came through this
/// watcher, another one, or a bare jar handle. Reads are served from the
/// snapshot; writes go through to the jar. Dropping the watcher releases
/// its subscription, after which further jar mutations no longer touch
/// the snapshot.
pub struct CookiesWatcher {
    jar: CookieJar,
    options: GetOptions,
    snapshot: Arc<Mutex<CookieMap>>,
    version: Arc<AtomicU64>,
    _subscription: Subscription,
}

impl CookiesWatcher {
    /// Watch `jar`, populating the initial snapshot synchronously.
    pub fn new(jar: &CookieJar, options: GetOptions) -> Self {
        let snapshot = Arc::new(Mutex::new(jar.get_all(&options)));
        let version = Arc::new(AtomicU64::new(0));
        let subscription = jar.subscribe({
            let jar = jar.clone();
            let snapshot = Arc::clone(&snapshot);
            let version = Arc::clone(&version);
            move || {
                let fresh = jar.get_all(&options);
                *lock(&snapshot) = fresh;
                version.fetch_add(1, Ordering::Release);
            }
        });
        // A mutation landing between the initial read and the
        // subscription would otherwise never reach the snapshot.
        *lock(&snapshot) = jar.get_all(&options);
        Self {
            jar: jar.clone(),
            options,
            snapshot,
            version,
            _subscription: subscription,
        }
    }

    /// Watch the process-wide ambient jar.
    pub fn ambient(options: GetOptions) -> Self {
        Self::new(&CookieJar::ambient(), options)
    }

    /// The current snapshot of the watched jar.
    pub fn cookies(&self) -> CookieMap {
        lock(&self.snapshot).clone()
    }

    /// Resync counter. An unchanged version between two reads guarantees
    /// equal snapshots, so consumers can skip downstream work.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Write one cookie through to the jar.
    pub fn set(&self, name: &str, value: &str, options: &SetOptions) {
        self.jar.set(name, value, options);
    }

    /// Remove one cookie through the jar.
    pub fn remove(&self, name: &str, options: &SetOptions) {
        self.jar.remove(name, options);
    }

    /// The read options this watcher was built with.
    pub fn options(&self) -> &GetOptions {
        &self.options
    }
}

fn lock(snapshot: &Mutex<CookieMap>) -> MutexGuard<'_, CookieMap> {
    match snapshot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
