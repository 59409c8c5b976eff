//! Per-page controllers.
//!
//! Each page keeps its request lifecycle in a [`RequestState`](crate::request::RequestState)
//! and exposes a `render` that returns a plain screen model, so the browser app
//! and the console draw the same thing and tests can assert on it.

pub mod create;
pub mod detail;
pub mod list;
