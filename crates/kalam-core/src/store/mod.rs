//! Bookmark storage abstraction.
//!
//! The [`BookmarkStore`] trait is the single persisted list every view
//! reads and writes. Views depend on the trait, so tests can substitute
//! [`memory::InMemoryBookmarkStore`] for the SQLite-backed store.
//!
//! Every mutation reads the whole list, modifies it and writes the whole
//! list back. There is no per-record identity beyond equality of
//! [`BookmarkKey`]s.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Bookmark, BookmarkKey};

/// Name of the slot the bookmark list is persisted under.
pub const BOOKMARK_SLOT: &str = "bookmarks";

/// Persisted bookmark list.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list`](BookmarkStore::list) | All records, most recent first |
/// | [`add`](BookmarkStore::add) | Append a record (no duplicate check) |
/// | [`remove`](BookmarkStore::remove) | Drop every record with a key |
/// | [`clear`](BookmarkStore::clear) | Drop every record |
/// | [`is_bookmarked`](BookmarkStore::is_bookmarked) | Existence check by key |
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Read the raw stored list, in storage order.
    async fn load(&self) -> Result<Vec<Bookmark>>;

    /// Replace the stored list.
    async fn save(&self, bookmarks: &[Bookmark]) -> Result<()>;

    /// All records ordered by `date`, most recent first.
    async fn list(&self) -> Result<Vec<Bookmark>> {
        let mut bookmarks = self.load().await?;
        sort_by_recency(&mut bookmarks);
        Ok(bookmarks)
    }

    async fn add(&self, bookmark: Bookmark) -> Result<()> {
        let mut bookmarks = self.load().await?;
        bookmarks.push(bookmark);
        self.save(&bookmarks).await
    }

    /// Remove every record whose key equals `key`. Removing an absent key
    /// leaves the list unchanged.
    async fn remove(&self, key: &BookmarkKey) -> Result<()> {
        let mut bookmarks = self.load().await?;
        bookmarks.retain(|b| b.key != *key);
        self.save(&bookmarks).await
    }

    async fn clear(&self) -> Result<()> {
        self.save(&[]).await
    }

    async fn is_bookmarked(&self, key: &BookmarkKey) -> Result<bool> {
        Ok(self.load().await?.iter().any(|b| b.key == *key))
    }
}

/// Sort most recent first. The sort is stable, so records saved at the
/// same instant keep their storage order.
pub fn sort_by_recency(bookmarks: &mut [Bookmark]) {
    bookmarks.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Decode a stored slot value. Anything that is not a list of bookmark
/// records reads as an empty list.
pub fn decode_slot(value: Option<&str>) -> Vec<Bookmark> {
    value
        .and_then(|v| serde_json::from_str(v).ok())
        .unwrap_or_default()
}

pub fn encode_slot(bookmarks: &[Bookmark]) -> Result<String> {
    Ok(serde_json::to_string(bookmarks)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_slot_defaults_to_empty() {
        assert!(decode_slot(None).is_empty());
        assert!(decode_slot(Some("not json")).is_empty());
        assert!(decode_slot(Some(r#"{"surah":"2"}"#)).is_empty());
        assert!(decode_slot(Some("[]")).is_empty());
    }
}
