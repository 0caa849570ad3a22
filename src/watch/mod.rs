//! Change-watching bindings over a jar.
//!
//! - [`cookies`] - Whole-map watcher with write-through mutation
//! - [`cookie`] - Single-key projection with a caller-supplied fallback

pub mod cookie;
pub mod cookies;
