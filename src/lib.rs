//! Smartmark — client core for a real-time personal bookmark manager.
//!
//! Users authenticate through a third-party identity provider, then create,
//! list, search, and delete bookmarks, with changes propagated across open
//! sessions through an owner-scoped change feed. Persistence and access
//! control live in the managed backend; this crate implements the client
//! contracts plus the optimistic-update reconciliation core.

pub mod app;
pub mod managers;
pub mod services;
pub mod types;
