//! One-shot cookie snapshots for server-side request handling.

use crate::base::options::GetOptions;
use crate::jar::store::{CookieJar, CookieMap};
use crate::request::context::RequestContext;

/// Snapshot every cookie reachable from `ctx` into a fresh map.
///
/// Seeds a throwaway jar from the context's `Cookie` header and
/// bulk-reads it. Synchronous and side-effect free, so it is safe to call
/// once per request; a context with no reachable header yields an empty
/// map, never an error.
pub fn request_cookies(ctx: &RequestContext) -> CookieMap {
    request_cookies_with(ctx, &GetOptions::default())
}

/// [`request_cookies`] with explicit read options.
pub fn request_cookies_with(ctx: &RequestContext, options: &GetOptions) -> CookieMap {
    CookieJar::from_header(ctx.cookie_header()).get_all(options)
}
