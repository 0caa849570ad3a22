//! A single stored cookie.

use time::OffsetDateTime;

use crate::base::options::{SameSite, SetOptions};

/// One cookie as held by the jar: the raw (still percent-encoded) value
/// plus the attributes supplied at write time.
///
/// The name is the jar's map key and is not duplicated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarEntry {
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
}

impl JarEntry {
    /// Entry for a value parsed out of a request header. Header cookies
    /// carry no attributes and never expire on their own.
    pub fn from_header_value(value: &str, now: OffsetDateTime) -> Self {
        Self {
            value: value.to_string(),
            path: None,
            domain: None,
            secure: false,
            http_only: false,
            same_site: None,
            creation_time: now,
            expiration_time: None,
        }
    }

    /// Entry for a write-through `set`, resolving `max_age`/`expires`
    /// into an absolute expiration.
    pub fn from_set(value: String, options: &SetOptions, now: OffsetDateTime) -> Self {
        Self {
            value,
            path: options.path.clone(),
            domain: options.domain.clone(),
            secure: options.secure,
            http_only: options.http_only,
            same_site: options.same_site,
            creation_time: now,
            expiration_time: options.expiration(now),
        }
    }

    /// Session entries (no expiration) never expire.
    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        match self.expiration_time {
            Some(expiry) => expiry < current_time,
            None => false,
        }
    }
}
