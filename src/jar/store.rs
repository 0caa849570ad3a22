//! The jar: a shared, observable cookie store.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use time::OffsetDateTime;

use crate::base::options::{GetOptions, SetOptions};
use crate::jar::entry::JarEntry;
use crate::jar::listener::{ChangeListeners, ListenerId, Subscription};

/// A fresh mapping of cookie names to values, produced by every bulk read.
pub type CookieMap = HashMap<String, String>;

/// Characters escaped when a value is written into the jar: everything a
/// `Cookie` header cannot carry verbatim, plus `%` so stored text is
/// unambiguous under decoding.
const VALUE_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b',')
    .add(b';')
    .add(b'\\');

/// Handle to one shared cookie store.
///
/// Clones are cheap and observe the same store, like handles to a
/// browser's single cookie jar. Mutations through any handle notify the
/// change listeners registered through every handle.
#[derive(Clone, Default)]
pub struct CookieJar {
    inner: Arc<JarInner>,
}

#[derive(Default)]
struct JarInner {
    entries: DashMap<String, JarEntry>,
    listeners: ChangeListeners,
    version: AtomicU64,
}

impl CookieJar {
    /// An empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// A jar seeded from a raw `Cookie` request header.
    ///
    /// Segments the parser rejects (attribute tokens such as a bare
    /// `HttpOnly`) are skipped. When a name repeats, the first occurrence
    /// wins: the header grammar orders cookies most-specific first.
    pub fn from_header(header: Option<&str>) -> Self {
        let jar = Self::new();
        let Some(header) = header else { return jar };
        let now = OffsetDateTime::now_utc();
        for parsed in cookie::Cookie::split_parse(header) {
            match parsed {
                Ok(c) => {
                    jar.inner
                        .entries
                        .entry(c.name().to_string())
                        .or_insert_with(|| JarEntry::from_header_value(c.value(), now));
                }
                Err(error) => {
                    tracing::debug!(%error, "skipping unparseable cookie segment");
                }
            }
        }
        jar
    }

    /// The process-wide jar, the shared store every ambient binding
    /// observes. Created empty on first use.
    pub fn ambient() -> Self {
        static AMBIENT: LazyLock<CookieJar> = LazyLock::new(CookieJar::new);
        AMBIENT.clone()
    }

    /// Read one cookie, honoring `options`.
    pub fn get(&self, name: &str, options: &GetOptions) -> Option<String> {
        let now = OffsetDateTime::now_utc();
        let entry = self.inner.entries.get(name)?;
        if entry.is_expired(now) {
            return None;
        }
        Some(read_value(&entry.value, options))
    }

    /// Read every live cookie into a fresh map.
    pub fn get_all(&self, options: &GetOptions) -> CookieMap {
        let now = OffsetDateTime::now_utc();
        self.inner
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .map(|entry| (entry.key().clone(), read_value(&entry.value().value, options)))
            .collect()
    }

    /// Write one cookie and notify listeners.
    ///
    /// The value is escaped on the way in, so reads (which decode unless
    /// asked not to) return it unchanged.
    pub fn set(&self, name: &str, value: &str, options: &SetOptions) {
        let now = OffsetDateTime::now_utc();
        let encoded = utf8_percent_encode(value, VALUE_ESCAPES).to_string();
        self.inner
            .entries
            .insert(name.to_string(), JarEntry::from_set(encoded, options, now));
        tracing::debug!(name = %name, "cookie set");
        self.bump();
    }

    /// Delete one cookie and notify listeners.
    ///
    /// Path and domain scoping does not apply to an in-process jar, so
    /// `options` is accepted for interface parity and otherwise unused.
    /// Listeners are notified even when the name was absent: a mutation
    /// was requested, and observers resynchronize by re-reading anyway.
    pub fn remove(&self, name: &str, _options: &SetOptions) {
        self.inner.entries.remove(name);
        tracing::debug!(name = %name, "cookie removed");
        self.bump();
    }

    /// Drop every entry with a single notification.
    pub fn clear(&self) {
        self.inner.entries.clear();
        tracing::debug!("cookie jar cleared");
        self.bump();
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Monotone counter bumped by every mutation. Equal versions imply an
    /// unchanged store.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Serialize the live entries back into a `Cookie` request-header
    /// string, or `None` when nothing would be sent.
    pub fn to_header(&self) -> Option<String> {
        let now = OffsetDateTime::now_utc();
        let pairs: Vec<String> = self
            .inner
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .map(|entry| format!("{}={}", entry.key(), entry.value().value))
            .collect();
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    /// Register a change listener invoked after every mutation.
    pub fn add_change_listener(&self, callback: impl Fn() + Send + Sync + 'static) -> ListenerId {
        self.inner.listeners.add(Arc::new(callback))
    }

    /// Deregister a listener. Returns `false` when the id was already gone.
    pub fn remove_change_listener(&self, id: ListenerId) -> bool {
        self.inner.listeners.remove(id)
    }

    /// Register a change listener tied to the returned guard's lifetime.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.add_change_listener(callback);
        Subscription::new(self.clone(), id)
    }

    fn bump(&self) {
        self.inner.version.fetch_add(1, Ordering::Release);
        self.inner.listeners.notify();
    }
}

impl fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieJar")
            .field("entries", &self.len())
            .field("version", &self.version())
            .finish()
    }
}

fn read_value(raw: &str, options: &GetOptions) -> String {
    if options.raw {
        return raw.to_string();
    }
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        // Undecodable escapes degrade to the stored bytes.
        Err(_) => raw.to_string(),
    }
}
