//! Bookmark list view and the star/delete/clear controls.

use anyhow::Result;

use kalam_core::bookmarks::{self, Toggled};
use kalam_core::display;
use kalam_core::models::{BookmarkKey, BookmarkListView, VerseRef};
use kalam_core::route::UnitKind;
use kalam_core::store::BookmarkStore;

use crate::provider::ContentProvider;
use crate::views::reading::ReadingController;

/// The saved list, most recent first.
pub async fn list(store: &dyn BookmarkStore) -> Result<BookmarkListView> {
    let saved = store.list().await?;
    Ok(display::bookmark_list(&saved))
}

/// Star or unstar the verse named by `key`.
///
/// Unstarring is local. Starring loads the unit the key belongs to, so the
/// record carries the chapter names a list entry shows.
pub async fn toggle_key(
    provider: &ContentProvider,
    store: &dyn BookmarkStore,
    key: BookmarkKey,
) -> Result<Toggled> {
    let saved = store.load().await?;
    let existing = saved.iter().find(|b| {
        b.key == key
            || matches!(key, BookmarkKey::ChapterVerse { chapter, verse }
                if b.refers_to(VerseRef { chapter, verse }))
    });
    if let Some(existing) = existing {
        return bookmarks::toggle(store, existing.clone()).await;
    }

    let (kind, unit_number, is_target): (UnitKind, String, Box<dyn Fn(u16, u16) -> bool>) =
        match key {
            BookmarkKey::ChapterVerse { chapter, verse } => (
                UnitKind::Chapter,
                chapter.to_string(),
                Box::new(move |number, _global| number == verse),
            ),
            BookmarkKey::SectionVerse {
                section,
                global_verse,
            } => (
                UnitKind::Section,
                section.to_string(),
                Box::new(move |_number, global| global == global_verse),
            ),
        };

    let mut controller = ReadingController::new(provider, kind);
    if let Some(e) = controller.activate(&unit_number, &saved).await.error() {
        return Err(e.clone().into());
    }
    let position = controller
        .state()
        .model()
        .and_then(|view| {
            view.verses
                .iter()
                .position(|v| is_target(v.number, v.global_number))
        })
        .ok_or_else(|| {
            anyhow::anyhow!("{} does not name a verse of {}", key, unit_label(&controller))
        })?;
    controller.toggle_bookmark(store, position).await
}

fn unit_label(controller: &ReadingController<'_>) -> String {
    controller
        .unit()
        .map(|u| u.label())
        .unwrap_or_default()
}

/// Delete the record with `key`. Deleting an absent key is a no-op.
pub async fn remove(store: &dyn BookmarkStore, key: &BookmarkKey) -> Result<bool> {
    let present = store.is_bookmarked(key).await?;
    store.remove(key).await?;
    Ok(present)
}

pub async fn clear(store: &dyn BookmarkStore) -> Result<()> {
    store.clear().await
}
