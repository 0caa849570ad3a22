//! Read and write option records.
//!
//! [`GetOptions`] applies to the parse step of any read; [`SetOptions`]
//! carries the write attributes recognized by the jar. The higher-level
//! bindings pass both through opaquely.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Options applied when reading cookies out of a jar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetOptions {
    /// Return values exactly as stored, skipping percent-decoding.
    pub raw: bool,
}

/// `SameSite` attribute values per RFC 6265bis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// Attributes applied when writing a cookie into a jar.
///
/// Unset fields are left to the store's defaults. When both `max_age`
/// and `expires` are present, `max_age` wins (RFC 6265 section 4.1.2.2).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetOptions {
    pub path: Option<String>,
    pub domain: Option<String>,
    /// Absolute expiration time.
    pub expires: Option<OffsetDateTime>,
    /// Lifetime relative to the moment of the write.
    pub max_age: Option<Duration>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
}

impl SetOptions {
    /// Resolve the effective expiration for a write happening at `now`.
    pub(crate) fn expiration(&self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        match self.max_age {
            Some(age) => Some(now + age),
            None => self.expires,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_max_age_wins_over_expires() {
        let now = datetime!(2024-06-01 12:00 UTC);
        let options = SetOptions {
            expires: Some(datetime!(2030-01-01 0:00 UTC)),
            max_age: Some(Duration::hours(1)),
            ..Default::default()
        };
        assert_eq!(options.expiration(now), Some(now + Duration::hours(1)));
    }

    #[test]
    fn test_expires_used_without_max_age() {
        let now = datetime!(2024-06-01 12:00 UTC);
        let options = SetOptions {
            expires: Some(datetime!(2030-01-01 0:00 UTC)),
            ..Default::default()
        };
        assert_eq!(options.expiration(now), Some(datetime!(2030-01-01 0:00 UTC)));
    }

    #[test]
    fn test_session_write_has_no_expiration() {
        let now = datetime!(2024-06-01 12:00 UTC);
        assert_eq!(SetOptions::default().expiration(now), None);
    }
}
