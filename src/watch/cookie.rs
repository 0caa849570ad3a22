//! Single-key cookie watcher.

use crate::base::options::{GetOptions, SetOptions};
use crate::jar::store::CookieJar;
use crate::watch::cookies::CookiesWatcher;

/// A live view of one named cookie, with a caller-supplied fallback.
///
/// Built directly on a [`CookiesWatcher`], so its reads always agree
/// with whole-map reads of the same jar. The fallback substitutes only
/// when the key is absent from the store; an empty string stored under
/// the key is a real value and is returned as-is.
pub struct CookieWatcher {
    name: String,
    fallback: Option<String>,
    options: SetOptions,
    cookies: CookiesWatcher,
}

impl CookieWatcher {
    /// Watch `name` in `jar`.
    pub fn new(jar: &CookieJar, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fallback: None,
            options: SetOptions::default(),
            cookies: CookiesWatcher::new(jar, GetOptions::default()),
        }
    }

    /// Watch `name` in the process-wide ambient jar.
    pub fn ambient(name: impl Into<String>) -> Self {
        Self::new(&CookieJar::ambient(), name)
    }

    /// Value returned while the key is absent from the store.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Write attributes applied by [`set`](Self::set) and
    /// [`remove`](Self::remove).
    pub fn with_options(mut self, options: SetOptions) -> Self {
        self.options = options;
        self
    }

    /// The resolved value: the stored one when present, else the fallback.
    pub fn value(&self) -> Option<String> {
        match self.cookies.cookies().get(&self.name) {
            Some(stored) => Some(stored.clone()),
            None => self.fallback.clone(),
        }
    }

    /// Write through to the jar under the fixed key.
    pub fn set(&self, value: &str) {
        self.cookies.set(&self.name, value, &self.options);
    }

    /// Remove the fixed key from the jar.
    pub fn remove(&self) {
        self.cookies.remove(&self.name, &self.options);
    }

    /// The watched cookie name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
