//! # Kalam Core
//!
//! Shared, I/O-free logic for Kalam: verse and bookmark models, route
//! validation, the view error taxonomy, raw API response shapes, display
//! transforms, the translation panel, the playback state machine and the
//! bookmark store abstraction.
//!
//! This crate contains no tokio, sqlx or HTTP dependencies. The `kalam`
//! crate supplies the network transport, SQLite storage and CLI on top.

pub mod api;
pub mod bookmarks;
pub mod display;
pub mod edition;
pub mod error;
pub mod models;
pub mod playback;
pub mod route;
pub mod store;
pub mod translation;
pub mod view;
