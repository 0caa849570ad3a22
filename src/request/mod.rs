//! Request-shaped context values and the server snapshot function.
//!
//! - [`context`] - The loosely-shaped, exhaustively optional request value
//! - [`snapshot`] - One-shot `Cookie`-header snapshots for request handling

pub mod context;
pub mod snapshot;
