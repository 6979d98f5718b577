//! # Kalam
//!
//! A terminal Quran reader. Kalam fetches chapters, sections (juz), pages
//! and single verses with their translations from the public
//! `api.alquran.cloud` service, renders them as text or JSON, plays
//! verse-by-verse recitation through an external player and keeps a local
//! bookmark list in SQLite.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Transport   │──▶│   Provider   │──▶│  Controllers │──▶ render / JSON
//! │ HTTP + retry │   │  endpoints   │   │ kalam-core   │
//! └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                              │
//!                                       ┌──────▼───────┐
//!                                       │ SQLite slot  │
//!                                       │  bookmarks   │
//!                                       └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! kalam init                    # create the bookmark database
//! kalam surahs --search baq     # chapter index
//! kalam surah 2 --lang en       # read a chapter with a translation
//! kalam juz 30 --play           # recite a section
//! kalam bookmarks toggle surah:2:255
//! kalam bookmarks list
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`fetch`] | HTTP transport and retry |
//! | [`provider`] | Remote endpoints and audio URLs |
//! | [`batch`] | Batched index loading |
//! | [`progress`] | Index progress on stderr |
//! | [`views`] | View controllers |
//! | [`player`] | Audio sinks and the play-all loop |
//! | [`render`] | Text rendering |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`sqlite_store`] | SQLite-backed bookmark store |

pub mod batch;
pub mod config;
pub mod db;
pub mod fetch;
pub mod migrate;
pub mod player;
pub mod progress;
pub mod provider;
pub mod render;
pub mod sqlite_store;
pub mod views;
