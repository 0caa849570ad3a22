//! The loosely-shaped request value cookies are extracted from.
//!
//! Server integrations hand over whatever request-like value they have.
//! Every level is optional and unknown fields are ignored, so a context
//! deserialized from an SSR bridge never fails shape validation; a
//! missing level just means no cookie header is reachable.

use http::header::COOKIE;
use http::HeaderMap;
use serde::{Deserialize, Serialize};

/// A request-shaped context value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestContext {
    pub req: Option<RequestParts>,
}

/// The request part of a context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestParts {
    pub headers: Option<HeaderFields>,
}

/// The header fields this crate cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderFields {
    pub cookie: Option<String>,
}

impl RequestContext {
    /// Context wrapping a raw `Cookie` header value.
    pub fn from_cookie_header(header: impl Into<String>) -> Self {
        Self {
            req: Some(RequestParts {
                headers: Some(HeaderFields {
                    cookie: Some(header.into()),
                }),
            }),
        }
    }

    /// Context built from a native header map. A non-UTF-8 `Cookie` value
    /// reads as absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let cookie = headers
            .get(COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        Self {
            req: Some(RequestParts {
                headers: Some(HeaderFields { cookie }),
            }),
        }
    }

    /// Navigate `context -> req -> headers -> cookie`, short-circuiting at
    /// the first absent level.
    pub fn cookie_header(&self) -> Option<&str> {
        self.req.as_ref()?.headers.as_ref()?.cookie.as_deref()
    }
}
