//! Controller shared by the chapter, section and page views.
//!
//! A controller is bound to one [`UnitKind`]. Activating it with a raw route
//! parameter validates the number (an invalid one never reaches the
//! network), fetches the original-script text and derives the
//! [`ReadingView`]. Translations are fetched on demand and memoised per
//! language until the controller is activated for another unit.

use anyhow::Result;
use chrono::Utc;

use kalam_core::api::RawAyah;
use kalam_core::bookmarks::{self, Toggled};
use kalam_core::display;
use kalam_core::edition::{Language, ARABIC_EDITION};
use kalam_core::error::ViewError;
use kalam_core::models::{Bookmark, ReadingView};
use kalam_core::route::{parse_unit, ReadingUnit, UnitKind};
use kalam_core::store::BookmarkStore;
use kalam_core::translation::{Selection, TranslationPanel, TranslationStatus};
use kalam_core::view::ViewState;

use crate::provider::{AudioClip, ContentProvider};

pub struct ReadingController<'a> {
    provider: &'a ContentProvider,
    kind: UnitKind,
    unit: Option<ReadingUnit>,
    state: ViewState<ReadingView>,
    translation: TranslationPanel,
}

impl<'a> ReadingController<'a> {
    pub fn new(provider: &'a ContentProvider, kind: UnitKind) -> Self {
        Self {
            provider,
            kind,
            unit: None,
            state: ViewState::Idle,
            translation: TranslationPanel::new(),
        }
    }

    pub fn state(&self) -> &ViewState<ReadingView> {
        &self.state
    }

    pub fn unit(&self) -> Option<ReadingUnit> {
        self.unit
    }

    pub fn translation_status(&self) -> TranslationStatus {
        self.translation.status()
    }

    /// Validate `raw` and load the unit it names.
    pub async fn activate(
        &mut self,
        raw: &str,
        bookmarks: &[Bookmark],
    ) -> &ViewState<ReadingView> {
        match parse_unit(self.kind, raw) {
            Ok(unit) => self.open(unit, bookmarks).await,
            Err(e) => {
                self.unit = None;
                self.state = ViewState::Error(e);
                &self.state
            }
        }
    }

    /// Load an already validated unit.
    pub async fn open(
        &mut self,
        unit: ReadingUnit,
        bookmarks: &[Bookmark],
    ) -> &ViewState<ReadingView> {
        if self.unit != Some(unit) {
            self.translation = TranslationPanel::new();
        }
        self.unit = Some(unit);
        self.state = ViewState::Loading;

        let mut result = self.load(unit).await;
        if let Ok(view) = result.as_mut() {
            display::mark_bookmarks(view, unit, bookmarks);
        }
        self.state = ViewState::settle(result);
        self.apply_translation();
        &self.state
    }

    async fn load(&self, unit: ReadingUnit) -> Result<ReadingView, ViewError> {
        let target = format!("{}/{}", unit.path(), ARABIC_EDITION);
        match unit {
            ReadingUnit::Chapter(n) => {
                let raw = self.provider.chapter(n, ARABIC_EDITION).await?;
                display::chapter_view(&target, raw)
            }
            ReadingUnit::Section(_) | ReadingUnit::Page(_) => {
                let raw = self.provider.collection(unit, ARABIC_EDITION).await?;
                display::collection_view(&target, unit, raw)
            }
        }
    }

    /// Fetch the `edition` text of `unit`. A body without verses, or with a
    /// different verse count than the loaded view, is malformed.
    async fn fetch_translation(
        &self,
        unit: ReadingUnit,
        edition: &str,
        expected: usize,
    ) -> Result<Vec<RawAyah>, ViewError> {
        let target = format!("{}/{}", unit.path(), edition);
        let ayahs = match unit {
            ReadingUnit::Chapter(n) => self.provider.chapter(n, edition).await?.ayahs,
            ReadingUnit::Section(_) | ReadingUnit::Page(_) => {
                Some(self.provider.collection(unit, edition).await?.ayahs)
            }
        };
        let Some(ayahs) = ayahs else {
            return Err(ViewError::MalformedResponse {
                target,
                reason: "missing ayahs".to_string(),
            });
        };
        if ayahs.len() != expected {
            return Err(ViewError::MalformedResponse {
                target,
                reason: format!("expected {} verses, got {}", expected, ayahs.len()),
            });
        }
        Ok(ayahs)
    }

    /// Show `language` next to each verse, fetching it on first use.
    ///
    /// Does nothing unless the view is ready. On failure the previously
    /// shown translation (if any) stays visible.
    pub async fn show_translation(&mut self, language: Language) -> Result<(), ViewError> {
        let Some(unit) = self.unit else {
            return Ok(());
        };
        let Some(expected) = self.state.model().map(|view| view.verses.len()) else {
            return Ok(());
        };

        if let Selection::Fetch(edition) = self.translation.select(language) {
            match self.fetch_translation(unit, edition, expected).await {
                Ok(translated) => {
                    if let Some(view) = self.state.model() {
                        let lines = display::align_translation(view, translated);
                        self.translation.fulfil(language, lines);
                    }
                }
                Err(e) => {
                    self.translation.fail();
                    self.apply_translation();
                    return Err(e);
                }
            }
        }
        self.apply_translation();
        Ok(())
    }

    /// Back to original script only.
    pub fn hide_translation(&mut self) {
        self.translation.hide();
        self.apply_translation();
    }

    fn apply_translation(&mut self) {
        let lines = self.translation.shown();
        if let Some(view) = self.state.model_mut() {
            display::apply_translation(view, lines);
        }
    }

    /// Refresh the star state of every verse.
    pub fn mark_bookmarks(&mut self, bookmarks: &[Bookmark]) {
        if let (Some(unit), Some(view)) = (self.unit, self.state.model_mut()) {
            display::mark_bookmarks(view, unit, bookmarks);
        }
    }

    /// Star or unstar the verse at `position` (zero-based).
    pub async fn toggle_bookmark(
        &mut self,
        store: &dyn BookmarkStore,
        position: usize,
    ) -> Result<Toggled> {
        let (Some(unit), Some(view)) = (self.unit, self.state.model()) else {
            anyhow::bail!("no verses are loaded");
        };
        let Some(verse) = view.verses.get(position) else {
            anyhow::bail!(
                "no verse at position {} ({} verses loaded)",
                position + 1,
                view.verses.len()
            );
        };
        let record = bookmarks::record_for(unit, verse, Utc::now());
        let outcome = bookmarks::toggle(store, record).await?;
        let saved = store.load().await?;
        self.mark_bookmarks(&saved);
        Ok(outcome)
    }

    /// Recitation clips for the loaded verses, in view order.
    pub fn playlist(&self) -> Vec<AudioClip> {
        self.state
            .model()
            .map(|view| {
                view.verses
                    .iter()
                    .map(|v| self.provider.audio_clip(v.global_number))
                    .collect()
            })
            .unwrap_or_default()
    }
}
