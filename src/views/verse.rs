//! Single-verse detail view: the verse in original script with its
//! Indonesian translation, fetched in one two-edition request.

use anyhow::Result;
use chrono::Utc;

use kalam_core::bookmarks::{self, Toggled};
use kalam_core::display;
use kalam_core::edition::{ARABIC_EDITION, DETAIL_TRANSLATION};
use kalam_core::error::ViewError;
use kalam_core::models::{Bookmark, BookmarkKey, VerseDetail, VerseEntry};
use kalam_core::route::{parse_chapter, parse_verse, ReadingUnit};
use kalam_core::store::BookmarkStore;
use kalam_core::view::ViewState;

use crate::provider::{AudioClip, ContentProvider};

pub struct VerseController<'a> {
    provider: &'a ContentProvider,
    state: ViewState<VerseDetail>,
}

impl<'a> VerseController<'a> {
    pub fn new(provider: &'a ContentProvider) -> Self {
        Self {
            provider,
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState<VerseDetail> {
        &self.state
    }

    /// Validate both route parameters and load the verse.
    ///
    /// A verse number beyond the chapter's length is only detectable after
    /// the fetch and is reported as an invalid parameter too.
    pub async fn activate(
        &mut self,
        chapter: &str,
        verse: &str,
        bookmarks: &[Bookmark],
    ) -> &ViewState<VerseDetail> {
        let parsed = parse_chapter(chapter).and_then(|c| Ok((c, parse_verse(verse)?)));
        let result = match parsed {
            Ok((chapter, verse)) => {
                self.state = ViewState::Loading;
                self.load(chapter, verse).await
            }
            Err(e) => Err(e),
        };
        self.state = ViewState::settle(result.map(|mut detail| {
            detail.bookmarked = bookmarks.iter().any(|b| b.refers_to(detail.verse_ref()));
            detail
        }));
        &self.state
    }

    async fn load(&self, chapter: u16, verse: u16) -> Result<VerseDetail, ViewError> {
        let editions = [ARABIC_EDITION, DETAIL_TRANSLATION.edition];
        let target = format!("surah/{}/editions/{}", chapter, editions.join(","));
        let raw = self.provider.chapter_editions(chapter, &editions).await?;
        display::verse_detail(&target, raw, verse)
    }

    /// Star or unstar the loaded verse. It is keyed by chapter and verse.
    pub async fn toggle_bookmark(&mut self, store: &dyn BookmarkStore) -> Result<Toggled> {
        let Some(detail) = self.state.model() else {
            anyhow::bail!("no verse is loaded");
        };
        let entry = VerseEntry {
            position: 0,
            text: detail.text.clone(),
            number: detail.number,
            global_number: detail.global_number,
            chapter: detail.chapter.clone(),
            translation: None,
            bookmarked: detail.bookmarked,
        };
        let unit = ReadingUnit::Chapter(detail.chapter.number);
        let record = bookmarks::record_for(unit, &entry, Utc::now());
        let outcome = bookmarks::toggle(store, record).await?;

        let saved = store.load().await?;
        if let Some(detail) = self.state.model_mut() {
            let key = BookmarkKey::ChapterVerse {
                chapter: detail.chapter.number,
                verse: detail.number,
            };
            detail.bookmarked = bookmarks::is_saved(&saved, &key, detail.verse_ref());
        }
        Ok(outcome)
    }

    pub fn clip(&self) -> Option<AudioClip> {
        self.state
            .model()
            .map(|d| self.provider.audio_clip(d.global_number))
    }
}
