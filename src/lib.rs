//! # cookiewatch
//!
//! Unified cookie access for applications that render both on a server
//! and on an interactive client.
//!
//! `cookiewatch` exposes a one-shot snapshot function for server-side
//! request handling and a pair of change-watching bindings for live view
//! code, all speaking to the same kind of observable cookie store.
//!
//! ## Features
//!
//! - **Request snapshots**: parse a request's `Cookie` header into a map,
//!   tolerant of missing or loosely-shaped request values
//! - **Observable store**: a process-wide jar with change listeners and
//!   RAII subscriptions
//! - **Change-watching bindings**: whole-map and single-key views that
//!   resynchronize on every store mutation
//! - **RFC 6265 parsing** delegated to the `cookie` crate
//!
//! ## Quick Start
//!
//! ```rust
//! use cookiewatch::base::options::{GetOptions, SetOptions};
//! use cookiewatch::jar::store::CookieJar;
//! use cookiewatch::request::context::RequestContext;
//! use cookiewatch::request::snapshot::request_cookies;
//! use cookiewatch::watch::cookies::CookiesWatcher;
//!
//! // Server side: one-shot snapshot of a request's cookies.
//! let ctx = RequestContext::from_cookie_header("name=value; session=abc123");
//! let cookies = request_cookies(&ctx);
//! assert_eq!(cookies["session"], "abc123");
//!
//! // Client side: watch and mutate a live store.
//! let jar = CookieJar::new();
//! let watcher = CookiesWatcher::new(&jar, GetOptions::default());
//! watcher.set("theme", "dark", &SetOptions::default());
//! assert_eq!(watcher.cookies()["theme"], "dark");
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Option records shared by reads and writes
//! - [`jar`] - The observable cookie store and subscription lifecycle
//! - [`request`] - Request-shaped context values and the snapshot function
//! - [`watch`] - Change-watching bindings over a jar

pub mod base;
pub mod jar;
pub mod request;
pub mod watch;
