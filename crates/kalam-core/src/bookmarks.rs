//! Star-control behaviour shared by all reading views.
//!
//! A verse saved from the chapter view and the same verse saved from the
//! section view have different [`BookmarkKey`]s. [`toggle`] treats them as
//! one verse, so starring never creates a second record for a verse that is
//! already saved under the other key space.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::models::{Bookmark, BookmarkKey, VerseEntry, VerseRef};
use crate::route::ReadingUnit;
use crate::store::BookmarkStore;

/// Key a verse is bookmarked under when starred from a view over `unit`.
/// Page views key by chapter, since pages carry full chapter information.
pub fn key_for(unit: ReadingUnit, verse: &VerseEntry) -> BookmarkKey {
    match unit {
        ReadingUnit::Section(section) => BookmarkKey::SectionVerse {
            section,
            global_verse: verse.global_number,
        },
        ReadingUnit::Chapter(_) | ReadingUnit::Page(_) => BookmarkKey::ChapterVerse {
            chapter: verse.chapter.number,
            verse: verse.number,
        },
    }
}

/// Build the record to store when `verse` is starred.
pub fn record_for(unit: ReadingUnit, verse: &VerseEntry, now: DateTime<Utc>) -> Bookmark {
    Bookmark {
        key: key_for(unit, verse),
        verse: verse.verse_ref(),
        chapter_name: verse.chapter.name.clone(),
        chapter_arabic_name: verse.chapter.arabic_name.clone(),
        date: now,
    }
}

/// Outcome of a star toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Whether `verse` is saved under `key` or under any other key.
pub fn is_saved(bookmarks: &[Bookmark], key: &BookmarkKey, verse: VerseRef) -> bool {
    bookmarks
        .iter()
        .any(|b| b.key == *key || b.refers_to(verse))
}

/// Flip the star for `record`'s verse.
///
/// If the verse is already saved (under its own key, or under the other
/// key space) every such record is removed; otherwise `record` is added.
pub async fn toggle(store: &dyn BookmarkStore, record: Bookmark) -> Result<Toggled> {
    let existing = store.load().await?;
    let matching: Vec<BookmarkKey> = existing
        .iter()
        .filter(|b| b.key == record.key || b.refers_to(record.verse))
        .map(|b| b.key)
        .collect();

    if matching.is_empty() {
        store.add(record).await?;
        return Ok(Toggled::Added);
    }

    for key in matching {
        store.remove(&key).await?;
    }
    Ok(Toggled::Removed)
}
