//! In-memory [`BookmarkStore`] for tests and in-process use.
//!
//! Keeps the list as an encoded slot string behind a `std::sync::RwLock`,
//! so it goes through the same decode path as persistent stores.

use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::Bookmark;

use super::{decode_slot, encode_slot, BookmarkStore};

pub struct InMemoryBookmarkStore {
    slot: RwLock<Option<String>>,
}

impl InMemoryBookmarkStore {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Start from a raw slot value, as if it had been written by an earlier
    /// session (or by something else entirely).
    pub fn with_raw(value: &str) -> Self {
        Self {
            slot: RwLock::new(Some(value.to_string())),
        }
    }
}

impl Default for InMemoryBookmarkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookmarkStore for InMemoryBookmarkStore {
    async fn load(&self) -> Result<Vec<Bookmark>> {
        let slot = self
            .slot
            .read()
            .map_err(|_| anyhow!("bookmark slot lock poisoned"))?;
        Ok(decode_slot(slot.as_deref()))
    }

    async fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        let encoded = encode_slot(bookmarks)?;
        let mut slot = self
            .slot
            .write()
            .map_err(|_| anyhow!("bookmark slot lock poisoned"))?;
        *slot = Some(encoded);
        Ok(())
    }
}
